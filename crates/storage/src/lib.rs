//! Storage layer for bucketdb
//!
//! This crate is the bucket accessor: the only code that talks to an
//! engine's transaction API.
//! - `Engine`: one transaction per call, scoped to one bucket
//! - `BucketRead` / `BucketWrite`: the primitives available inside it
//! - `RedbEngine`: redb-backed database file
//! - `MemoryEngine`: in-process engine with the same isolation
//! - `StoreConfig`: database path and engine settings (env var or TOML)

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod backends;
pub mod config;
pub mod engine;

pub use backends::{MemoryEngine, RedbEngine};
pub use config::{Durability, StoreConfig, DEFAULT_PATH, PATH_ENV_VAR};
pub use engine::{BucketRead, BucketWrite, Engine};
