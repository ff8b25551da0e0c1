//! Record helpers
//!
//! Shorthands for types implementing [`Record`], which name their own bucket
//! and key. Each one forwards to the matching bucket-level operation.

use bucketdb_core::{Record, Result};
use bucketdb_storage::Engine;

use crate::store::Store;

impl<E: Engine> Store<E> {
    /// Store `record` under its own key in `R::BUCKET`.
    pub fn save<R: Record>(&self, record: &R) -> Result<()> {
        self.put(R::BUCKET, record.key(), record)
    }

    /// Load the record stored under `key`.
    ///
    /// Fails with `NotFound` when it does not exist.
    pub fn load<R: Record>(&self, key: impl AsRef<[u8]>) -> Result<R> {
        self.get(R::BUCKET, key)
    }

    /// Load the record stored under `key`, if any.
    pub fn try_load<R: Record>(&self, key: impl AsRef<[u8]>) -> Result<Option<R>> {
        self.try_get(R::BUCKET, key)
    }

    /// Remove the record stored under `key`. Returns whether it existed.
    pub fn remove<R: Record>(&self, key: impl AsRef<[u8]>) -> Result<bool> {
        self.delete(R::BUCKET, key)
    }
}
