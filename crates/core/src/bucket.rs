//! Bucket naming rules
//!
//! A bucket is a named keyspace inside the engine. Names are UTF-8 because
//! the engine names its tables with strings. Any non-empty name is accepted;
//! length is left to the engine.

use crate::error::{Error, Result};

/// Check that `name` can identify a bucket.
///
/// # Errors
///
/// Returns [`Error::InvalidBucket`] for the empty name.
pub fn validate_bucket_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::InvalidBucket("bucket name is empty".to_string()));
    }
    Ok(())
}

/// Render a raw key for messages and logs
pub fn display_key(key: &[u8]) -> String {
    String::from_utf8_lossy(key).into_owned()
}
