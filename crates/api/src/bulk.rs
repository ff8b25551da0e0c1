//! Bulk retrieval
//!
//! Walks a whole bucket inside one read transaction, decoding every value
//! into a fresh element and handing it to the caller's collection through
//! [`Collect::insert_entry`]. The walk does not know the collection shape;
//! `Vec`, string-keyed and byte-keyed maps all go through the same loop.
//!
//! A malformed entry stops the walk with a decoding error. Elements
//! inserted before it stay in the collection, which must then be treated as
//! incomplete.

use bucketdb_core::{Collect, Result, Stored};
use bucketdb_storage::Engine;
use tracing::debug;

use crate::store::Store;

impl<E: Engine> Store<E> {
    /// Fill `items` with every entry of the bucket it names.
    ///
    /// Entries are added to whatever `items` already holds, in key order.
    /// An absent or empty bucket adds nothing. Returns the number of entries
    /// read.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let mut by_id: HashMap<String, Record> = HashMap::new();
    /// store.get_stored(&mut by_id)?;
    ///
    /// let mut all: Vec<Record> = Vec::new();
    /// store.get_stored(&mut all)?;
    /// ```
    pub fn get_stored<S: Stored + ?Sized>(&self, items: &mut S) -> Result<usize> {
        let bucket = items.bucket().to_string();
        self.collect(&bucket, items)
    }

    /// Fresh collection holding every entry of the bucket `S` names.
    pub fn load_all<S: Stored + Default>(&self) -> Result<S> {
        let mut items = S::default();
        self.get_stored(&mut items)?;
        Ok(items)
    }

    /// Fill `items` with every entry of `bucket`.
    ///
    /// Same walk as [`get_stored`](Self::get_stored) for collections that do
    /// not name a bucket themselves.
    pub fn collect<C: Collect + ?Sized>(&self, bucket: &str, items: &mut C) -> Result<usize> {
        let mut entries = 0usize;
        let walk = self.engine.view(bucket, |b| {
            let Some(b) = b else {
                return Ok(());
            };
            b.for_each(&mut |key, value| {
                let item: C::Item = self.decode_entry(bucket, key, value)?;
                items
                    .insert_entry(key, item)
                    .map_err(|e| e.in_bucket(bucket))?;
                entries += 1;
                Ok(())
            })
        });

        match walk {
            Ok(()) => {
                debug!(target: "bucketdb::store", bucket, entries, "Collected bucket");
                Ok(entries)
            }
            Err(e) => {
                debug!(
                    target: "bucketdb::store",
                    bucket,
                    entries,
                    error = %e,
                    "Bucket walk stopped"
                );
                Err(e)
            }
        }
    }

    /// Every key in `bucket`, in key order.
    pub fn keys(&self, bucket: &str) -> Result<Vec<Vec<u8>>> {
        self.engine.view(bucket, |b| {
            let mut keys = Vec::new();
            if let Some(b) = b {
                b.for_each(&mut |key, _| {
                    keys.push(key.to_vec());
                    Ok(())
                })?;
            }
            Ok(keys)
        })
    }

    /// Number of entries in `bucket`; `0` when it does not exist.
    pub fn count(&self, bucket: &str) -> Result<u64> {
        self.engine.view(bucket, |b| match b {
            Some(b) => b.len(),
            None => Ok(0),
        })
    }
}
