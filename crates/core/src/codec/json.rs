//! JSON codec.
//!
//! Compact `serde_json` output, one JSON document per stored value.

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::traits::{Codec, CodecError};

/// JSON codec - the on-disk encoding for every bucket.
///
/// # Example
///
/// ```
/// use bucketdb_core::codec::{Codec, JsonCodec};
/// use std::collections::BTreeMap;
///
/// let codec = JsonCodec;
/// let mut doc = BTreeMap::new();
/// doc.insert("ID".to_string(), "id-1".to_string());
///
/// let encoded = codec.encode(&doc).unwrap();
/// assert_eq!(encoded, br#"{"ID":"id-1"}"#);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>, CodecError> {
        serde_json::to_vec(value).map_err(|e| CodecError::Encode(e.to_string()))
    }

    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, CodecError> {
        serde_json::from_slice(data).map_err(|e| CodecError::Decode(e.to_string()))
    }

    fn codec_id(&self) -> &str {
        "json"
    }
}
