//! Public API layer for bucketdb
//!
//! This crate provides [`Store`], the handle every caller works through:
//! - **CRUD**: `put`, `get`, `try_get`, `delete`, `contains`, `put_many`
//! - **Bulk retrieval**: `get_stored`, `load_all`, `collect` fill any
//!   collection shape implementing [`Collect`]/[`Stored`]
//! - **Records**: `save`, `load`, `remove` for types implementing [`Record`]
//! - **Buckets**: `ensure_bucket`, `buckets`, `drop_bucket`, `keys`, `count`
//!
//! ## Architectural Invariant
//!
//! Every operation runs in **exactly one engine transaction**. Values are
//! encoded before a write transaction opens and decoded after a read
//! transaction has copied the bytes out, so transactions hold no codec work
//! beyond what bulk retrieval needs.
//!
//! ## Quick Start
//!
//! ```ignore
//! use bucketdb_api::{Store, StoreConfig};
//!
//! let store = Store::open(&StoreConfig::from_env())?;
//! store.put("Records", "id-1", &record)?;
//! let loaded: Record = store.get("Records", "id-1")?;
//! store.close();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod bulk;
mod record;
mod store;

pub use store::Store;

// Re-export the types callers need alongside a store
pub use bucketdb_core::{Codec, Collect, Error, JsonCodec, Record, Result, Stored};
pub use bucketdb_storage::{
    Durability, Engine, MemoryEngine, RedbEngine, StoreConfig, DEFAULT_PATH, PATH_ENV_VAR,
};
