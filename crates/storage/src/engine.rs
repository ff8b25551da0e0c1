//! Bucket accessor traits.
//!
//! Everything above this module talks to the engine through these traits.
//! Each call to [`Engine::view`] or [`Engine::update`] is exactly one engine
//! transaction, scoped to a single bucket:
//!
//! - `view` runs a closure inside a read transaction. The closure sees a
//!   consistent snapshot and gets only read primitives.
//! - `update` runs a closure inside a write transaction, creating the bucket
//!   if it is missing. The transaction commits if the closure returns `Ok`
//!   and rolls back if it returns `Err` or panics.
//!
//! No transaction outlives the call that opened it.

use bucketdb_core::Result;

/// Read primitives for one bucket inside an open transaction.
pub trait BucketRead {
    /// Get the bytes stored under `key`.
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>>;

    /// Visit every entry in engine key order (lexicographic bytes).
    ///
    /// Stops at, and returns, the first error produced by `f`.
    fn for_each(&self, f: &mut dyn FnMut(&[u8], &[u8]) -> Result<()>) -> Result<()>;

    /// Number of entries in the bucket.
    fn len(&self) -> Result<u64>;

    /// Whether the bucket has no entries.
    fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

/// Write primitives for one bucket inside an open write transaction.
pub trait BucketWrite: BucketRead {
    /// Store `value` under `key`, replacing any previous value.
    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<()>;

    /// Remove `key`. Returns whether it was present.
    fn delete(&mut self, key: &[u8]) -> Result<bool>;
}

/// A transactional engine organized into named buckets.
///
/// Engines are shared between threads; isolation between concurrent calls
/// is the engine's job (one writer, many snapshot readers).
pub trait Engine: Send + Sync {
    /// Run `f` in a read transaction on `bucket`.
    ///
    /// `f` receives `None` when the bucket does not exist.
    fn view<T, F>(&self, bucket: &str, f: F) -> Result<T>
    where
        F: FnOnce(Option<&dyn BucketRead>) -> Result<T>;

    /// Run `f` in a write transaction on `bucket`, creating it if missing.
    ///
    /// Commits when `f` returns `Ok`; otherwise nothing `f` wrote becomes
    /// visible.
    fn update<T, F>(&self, bucket: &str, f: F) -> Result<T>
    where
        F: FnOnce(&mut dyn BucketWrite) -> Result<T>;

    /// Names of all existing buckets, sorted.
    fn bucket_names(&self) -> Result<Vec<String>>;

    /// Delete a bucket and all of its entries. Returns whether it existed.
    fn drop_bucket(&self, bucket: &str) -> Result<bool>;

    /// Short engine identifier for logs.
    fn engine_name(&self) -> &'static str;
}
