//! Record trait: a value type that knows where it lives.

use serde::de::DeserializeOwned;
use serde::Serialize;

/// A storable value that names its own bucket and key.
///
/// Implementing `Record` lets a type be saved and loaded without repeating
/// the bucket name at each call site, and lets collections of it act as
/// [`Stored`](crate::stored::Stored) collections.
///
/// # Example
///
/// ```
/// use bucketdb_core::Record;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct Session {
///     id: String,
///     user: String,
/// }
///
/// impl Record for Session {
///     const BUCKET: &'static str = "Sessions";
///
///     fn key(&self) -> Vec<u8> {
///         self.id.as_bytes().to_vec()
///     }
/// }
/// ```
pub trait Record: Serialize + DeserializeOwned {
    /// Bucket every value of this type is stored in.
    const BUCKET: &'static str;

    /// Key this value is stored under.
    fn key(&self) -> Vec<u8>;
}
