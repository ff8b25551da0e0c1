//! bucketdb - Typed JSON persistence over an embedded transactional bucket store
//!
//! bucketdb stores application records, encoded as JSON, in named buckets of
//! an embedded key-value engine. Callers work with typed values; bucket
//! lookup, transactions and encoding are handled by the [`Store`].
//!
//! # Quick Start
//!
//! ```ignore
//! use bucketdb::{Record, Store, StoreConfig};
//!
//! // Open the file named by BUCKETDB_PATH (default: bucketdb.redb)
//! let store = Store::open(&StoreConfig::from_env())?;
//!
//! store.save(&record)?;
//! let loaded: MyRecord = store.load(record.key())?;
//!
//! // Every record in the bucket, keyed by record key
//! let all: HashMap<String, MyRecord> = store.load_all()?;
//! ```
//!
//! # Architecture
//!
//! - `bucketdb-core`: errors, codec, `Record`, `Collect`/`Stored` contracts
//! - `bucketdb-storage`: engine traits, redb and in-memory engines, config
//! - `bucketdb-api`: the `Store` handle
//!
//! Only the types needed to use a store are re-exported here.

pub use bucketdb_api::*;
