//! Error types for bucketdb
//!
//! This module defines all error types used throughout the system.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.
//!
//! The taxonomy follows what can go wrong between a typed value and the
//! engine: the value cannot be encoded, the stored bytes cannot be decoded,
//! the key is absent, or the engine itself failed. None of these are retried
//! by the library.

use crate::bucket::display_key;
use crate::codec::CodecError;
use std::fmt::Display;
use std::io;
use thiserror::Error;

/// Result type alias for bucketdb operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for bucketdb
#[derive(Debug, Error)]
pub enum Error {
    /// Value cannot be serialized by the codec
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Stored bytes do not match the requested shape (corruption or schema drift)
    #[error("Decoding error in bucket '{bucket}' at key {key:?}: {reason}")]
    Decoding {
        /// Bucket the entry was read from
        bucket: String,
        /// Key of the offending entry (lossy UTF-8)
        key: String,
        /// Codec failure description
        reason: String,
    },

    /// Key (or its bucket) is absent on a read that expects presence
    #[error("Key not found in bucket '{bucket}': {key:?}")]
    NotFound {
        /// Bucket that was searched
        bucket: String,
        /// Missing key (lossy UTF-8)
        key: String,
    },

    /// Engine-level failure: I/O, transaction, commit, closed handle
    #[error("Storage error: {0}")]
    Storage(String),

    /// Bucket name violates naming rules
    #[error("Invalid bucket name: {0}")]
    InvalidBucket(String),

    /// Configuration cannot be read, parsed or validated
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error outside the engine (config files, directories)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// Wrap an engine failure
    pub fn storage(err: impl Display) -> Self {
        Error::Storage(err.to_string())
    }

    /// Decoding failure for the entry at `key` in `bucket`
    pub fn decoding(bucket: &str, key: &[u8], reason: impl Display) -> Self {
        Error::Decoding {
            bucket: bucket.to_string(),
            key: display_key(key),
            reason: reason.to_string(),
        }
    }

    /// Missing `key` in `bucket`
    pub fn not_found(bucket: &str, key: &[u8]) -> Self {
        Error::NotFound {
            bucket: bucket.to_string(),
            key: display_key(key),
        }
    }

    /// Attach the bucket name to a decoding error raised without one
    pub fn in_bucket(self, name: &str) -> Self {
        match self {
            Error::Decoding { bucket, key, reason } if bucket.is_empty() => Error::Decoding {
                bucket: name.to_string(),
                key,
                reason,
            },
            other => other,
        }
    }

    /// Whether this error reports an absent key or bucket
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }

    /// Whether this error reports undecodable stored bytes
    pub fn is_decoding(&self) -> bool {
        matches!(self, Error::Decoding { .. })
    }
}

impl From<CodecError> for Error {
    fn from(e: CodecError) -> Self {
        match e {
            CodecError::Encode(msg) => Error::Encoding(msg),
            // Decode failures without entry context (e.g. a bare codec call)
            CodecError::Decode(msg) => Error::Decoding {
                bucket: String::new(),
                key: String::new(),
                reason: msg,
            },
        }
    }
}
