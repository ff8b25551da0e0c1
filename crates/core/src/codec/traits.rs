//! Codec trait definitions.

use serde::de::DeserializeOwned;
use serde::Serialize;

/// Value codec trait.
///
/// Translates typed values to the bytes handed to the engine and back.
/// Implementations are pure: no I/O, no shared state.
///
/// # Thread Safety
///
/// Codecs must be `Send + Sync` so a single instance can serve every
/// thread sharing a store.
pub trait Codec: Send + Sync {
    /// Encode a value for storage.
    ///
    /// Fails when the value contains something the format cannot
    /// represent.
    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>, CodecError>;

    /// Decode bytes read from storage into `T`.
    ///
    /// Fails when the bytes are not well-formed for `T`.
    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, CodecError>;

    /// Unique codec identifier.
    fn codec_id(&self) -> &str;
}

/// Codec errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    /// Value cannot be represented in the codec's format.
    #[error("Encode error: {0}")]
    Encode(String),

    /// Bytes are not valid for the requested type.
    #[error("Decode error: {0}")]
    Decode(String),
}
