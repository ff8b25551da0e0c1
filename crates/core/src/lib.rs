//! Core types and traits for bucketdb
//!
//! This crate defines the foundational types used throughout the system:
//! - Error: Error type hierarchy (encoding, decoding, not found, storage)
//! - Codec: Typed value <-> byte translation (JSON)
//! - Bucket: Bucket naming rules
//! - Record: Value types that name their own bucket and key
//! - Stored: Capability contracts for bulk retrieval into any collection shape

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bucket;
pub mod codec;
pub mod error;
pub mod record;
pub mod stored;

pub use bucket::{display_key, validate_bucket_name};
pub use codec::{Codec, CodecError, JsonCodec};
pub use error::{Error, Result};
pub use record::Record;
pub use stored::{Collect, Stored};
