//! In-memory storage backend.
//!
//! Keeps every bucket in a `BTreeMap` and never touches disk. Used for tests
//! and ephemeral stores.
//!
//! # Design Notes
//!
//! - **Copy-on-write snapshots**: the whole state is an `Arc` swapped on
//!   commit. Readers clone the `Arc` and release the lock immediately, so a
//!   read transaction sees the state as of its start and never blocks a
//!   writer.
//! - **Single writer**: a writer mutex serializes write transactions. A write
//!   transaction works on a private copy of its bucket (copied on the first
//!   write) that is published only when the closure succeeds, so errors and
//!   panics roll back by discarding the copy.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::sync::Arc;

use bucketdb_core::{validate_bucket_name, Result};
use parking_lot::{Mutex, RwLock};

use crate::engine::{BucketRead, BucketWrite, Engine};

type Entries = BTreeMap<Vec<u8>, Vec<u8>>;
type Snapshot = BTreeMap<String, Arc<Entries>>;

/// A storage engine that keeps all buckets in memory.
///
/// Data is lost when the engine is dropped.
#[derive(Debug, Default)]
pub struct MemoryEngine {
    /// Latest committed state
    state: RwLock<Arc<Snapshot>>,
    /// Held for the duration of a write transaction
    writer: Mutex<()>,
}

impl MemoryEngine {
    /// Create an empty engine.
    pub fn new() -> Self {
        Self::default()
    }

    fn snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(&self.state.read())
    }
}

impl Engine for MemoryEngine {
    fn view<T, F>(&self, bucket: &str, f: F) -> Result<T>
    where
        F: FnOnce(Option<&dyn BucketRead>) -> Result<T>,
    {
        validate_bucket_name(bucket)?;
        let snapshot = self.snapshot();

        match snapshot.get(bucket) {
            Some(entries) => {
                let bucket = MemoryBucket {
                    entries: Cow::Borrowed(&**entries),
                };
                f(Some(&bucket as &dyn BucketRead))
            }
            None => f(None),
        }
    }

    fn update<T, F>(&self, bucket: &str, f: F) -> Result<T>
    where
        F: FnOnce(&mut dyn BucketWrite) -> Result<T>,
    {
        validate_bucket_name(bucket)?;
        let _writer = self.writer.lock();
        let snapshot = self.snapshot();

        let empty = Entries::new();
        let existing = snapshot.get(bucket);
        let mut working = MemoryBucket {
            entries: Cow::Borrowed(existing.map_or(&empty, |e| &**e)),
        };

        let value = f(&mut working as &mut dyn BucketWrite)?;

        let modified = matches!(working.entries, Cow::Owned(_));
        if existing.is_none() || modified {
            let mut next = Snapshot::clone(&snapshot);
            next.insert(bucket.to_string(), Arc::new(working.entries.into_owned()));
            *self.state.write() = Arc::new(next);
        }

        Ok(value)
    }

    fn bucket_names(&self) -> Result<Vec<String>> {
        // BTreeMap keys are already sorted
        Ok(self.snapshot().keys().cloned().collect())
    }

    fn drop_bucket(&self, bucket: &str) -> Result<bool> {
        validate_bucket_name(bucket)?;
        let _writer = self.writer.lock();
        let snapshot = self.snapshot();

        if !snapshot.contains_key(bucket) {
            return Ok(false);
        }
        let mut next = Snapshot::clone(&snapshot);
        next.remove(bucket);
        *self.state.write() = Arc::new(next);
        Ok(true)
    }

    fn engine_name(&self) -> &'static str {
        "memory"
    }
}

/// One bucket inside a transaction: borrowed from the snapshot until the
/// first write, owned afterwards.
struct MemoryBucket<'a> {
    entries: Cow<'a, Entries>,
}

impl BucketRead for MemoryBucket<'_> {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        Ok(self.entries.get(key).cloned())
    }

    fn for_each(&self, f: &mut dyn FnMut(&[u8], &[u8]) -> Result<()>) -> Result<()> {
        for (key, value) in self.entries.iter() {
            f(key, value)?;
        }
        Ok(())
    }

    fn len(&self) -> Result<u64> {
        Ok(self.entries.len() as u64)
    }
}

impl BucketWrite for MemoryBucket<'_> {
    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<()> {
        self.entries.to_mut().insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    fn delete(&mut self, key: &[u8]) -> Result<bool> {
        if !self.entries.contains_key(key) {
            return Ok(false);
        }
        Ok(self.entries.to_mut().remove(key).is_some())
    }
}
