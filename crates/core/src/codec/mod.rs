//! Value codec abstraction.
//!
//! Every value passing between callers and the engine goes through the codec:
//! typed values are encoded to bytes on write and decoded back on read.
//!
//! Uses `JsonCodec`, so persisted values are UTF-8 JSON text and stay
//! readable with ordinary tools.
//!
//! # Usage
//!
//! ```
//! use bucketdb_core::codec::{Codec, JsonCodec};
//!
//! let codec = JsonCodec;
//! let encoded = codec.encode(&vec![1u32, 2, 3]).unwrap();
//! assert_eq!(encoded, b"[1,2,3]");
//!
//! let decoded: Vec<u32> = codec.decode(&encoded).unwrap();
//! assert_eq!(decoded, vec![1, 2, 3]);
//! ```

mod json;
mod traits;

pub use json::JsonCodec;
pub use traits::{Codec, CodecError};
