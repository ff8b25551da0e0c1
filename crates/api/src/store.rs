//! Store handle and single-key operations
//!
//! A [`Store`] owns one engine and one codec. It is opened explicitly, shared
//! by reference or `Arc`, and closed with [`Store::close`] (or on drop).
//!
//! ## Transactions
//!
//! | Operation | Transaction |
//! |-----------|-------------|
//! | `get`, `try_get`, `contains` | one read |
//! | `put`, `put_many`, `delete`, `ensure_bucket` | one write |
//! | `drop_bucket` | one write (engine-level) |
//!
//! Write operations create their bucket if it does not exist yet. Reads on a
//! missing bucket behave as if the bucket were empty.

use std::path::PathBuf;

use bucketdb_core::{Codec, Error, JsonCodec, Result};
use bucketdb_storage::{Engine, MemoryEngine, RedbEngine, StoreConfig};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info};

/// Typed JSON persistence over a bucket engine.
///
/// `Store` is `Send + Sync` whenever its engine is, so one handle can serve
/// every thread of a process.
///
/// # Example
///
/// ```ignore
/// let store = Store::in_memory();
/// store.put("Records", "id-1", &Item { id: "id-1".into() })?;
///
/// let item: Item = store.get("Records", "id-1")?;
/// assert!(store.delete("Records", "id-1")?);
/// assert!(store.get::<Item>("Records", "id-1").unwrap_err().is_not_found());
/// ```
pub struct Store<E: Engine = RedbEngine> {
    pub(crate) engine: E,
    pub(crate) codec: JsonCodec,
    /// Where the data lives, for logs
    location: String,
}

impl Store<RedbEngine> {
    /// Open (or create) the database file described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for an invalid configuration and
    /// [`Error::Storage`] if the engine cannot open the file.
    pub fn open(config: &StoreConfig) -> Result<Self> {
        let engine = RedbEngine::open(config)?;
        let location = engine.path().display().to_string();
        Ok(Self::from_parts(engine, location))
    }

    /// Open the database file at `path` with default settings.
    pub fn open_path(path: impl Into<PathBuf>) -> Result<Self> {
        Self::open(&StoreConfig::new(path))
    }

    /// Open the database named by `BUCKETDB_PATH` (or the default path).
    pub fn from_env() -> Result<Self> {
        Self::open(&StoreConfig::from_env())
    }

    /// Path of the database file.
    pub fn path(&self) -> &std::path::Path {
        self.engine.path()
    }
}

impl Store<MemoryEngine> {
    /// A store whose data lives only as long as the handle.
    pub fn in_memory() -> Self {
        Self::from_parts(MemoryEngine::new(), ":memory:".to_string())
    }
}

impl<E: Engine> Store<E> {
    /// Wrap an already constructed engine.
    pub fn with_engine(engine: E) -> Self {
        let location = engine.engine_name().to_string();
        Self::from_parts(engine, location)
    }

    fn from_parts(engine: E, location: String) -> Self {
        info!(
            target: "bucketdb::store",
            path = %location,
            engine = engine.engine_name(),
            "Opened store"
        );
        Self {
            engine,
            codec: JsonCodec,
            location,
        }
    }

    /// The underlying engine.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// The codec values are stored with.
    pub fn codec(&self) -> &JsonCodec {
        &self.codec
    }

    /// Close the store, releasing the engine.
    ///
    /// Consumes the handle, so no operation can be in flight.
    pub fn close(self) {
        info!(
            target: "bucketdb::store",
            path = %self.location,
            engine = self.engine.engine_name(),
            "Closed store"
        );
    }

    // ========================================================================
    // CRUD
    // ========================================================================

    /// Store `value` under `key` in `bucket`, replacing any previous value.
    ///
    /// The value is encoded before the write transaction opens, so an
    /// encoding failure leaves the engine untouched.
    ///
    /// # Errors
    ///
    /// [`Error::Encoding`] if the value cannot be encoded, [`Error::Storage`]
    /// if the transaction fails to commit.
    pub fn put<T>(&self, bucket: &str, key: impl AsRef<[u8]>, value: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        let key = key.as_ref();
        let bytes = self.codec.encode(value)?;
        self.engine.update(bucket, |b| b.put(key, &bytes))
    }

    /// Fetch and decode the value stored under `key` in `bucket`.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] if the key or the bucket is absent,
    /// [`Error::Decoding`] if the stored bytes do not decode as `T`.
    pub fn get<T: DeserializeOwned>(&self, bucket: &str, key: impl AsRef<[u8]>) -> Result<T> {
        let key = key.as_ref();
        self.try_get(bucket, key)?
            .ok_or_else(|| Error::not_found(bucket, key))
    }

    /// Like [`get`](Self::get), but absence is `Ok(None)`.
    ///
    /// A stored JSON `null` read as `Option<U>` comes back as `Some(None)`,
    /// so a missing key and a null value stay distinguishable.
    pub fn try_get<T: DeserializeOwned>(
        &self,
        bucket: &str,
        key: impl AsRef<[u8]>,
    ) -> Result<Option<T>> {
        let key = key.as_ref();
        let bytes = self.engine.view(bucket, |b| match b {
            Some(b) => b.get(key),
            None => Ok(None),
        })?;

        bytes
            .map(|bytes| self.decode_entry(bucket, key, &bytes))
            .transpose()
    }

    /// Remove `key` from `bucket`. Returns whether a value was removed.
    ///
    /// Removing an absent key is not an error.
    pub fn delete(&self, bucket: &str, key: impl AsRef<[u8]>) -> Result<bool> {
        let key = key.as_ref();
        self.engine.update(bucket, |b| b.delete(key))
    }

    /// Whether `bucket` holds a value under `key`.
    pub fn contains(&self, bucket: &str, key: impl AsRef<[u8]>) -> Result<bool> {
        let key = key.as_ref();
        self.engine.view(bucket, |b| match b {
            Some(b) => Ok(b.get(key)?.is_some()),
            None => Ok(false),
        })
    }

    /// Store several values in one write transaction.
    ///
    /// Every value is encoded first; if any fails to encode nothing is
    /// written. Returns the number of entries written.
    pub fn put_many<K, V, I>(&self, bucket: &str, entries: I) -> Result<usize>
    where
        K: AsRef<[u8]>,
        V: Serialize,
        I: IntoIterator<Item = (K, V)>,
    {
        let encoded = entries
            .into_iter()
            .map(|(key, value)| Ok((key, self.codec.encode(&value)?)))
            .collect::<Result<Vec<_>>>()?;

        self.engine.update(bucket, |b| {
            for (key, bytes) in &encoded {
                b.put(key.as_ref(), bytes)?;
            }
            Ok(encoded.len())
        })
    }

    // ========================================================================
    // Buckets
    // ========================================================================

    /// Create `bucket` if it does not exist.
    pub fn ensure_bucket(&self, bucket: &str) -> Result<()> {
        self.engine.update(bucket, |_| Ok(()))?;
        debug!(target: "bucketdb::store", bucket, "Ensured bucket");
        Ok(())
    }

    /// Names of all buckets, sorted.
    pub fn buckets(&self) -> Result<Vec<String>> {
        self.engine.bucket_names()
    }

    /// Delete `bucket` and everything in it. Returns whether it existed.
    pub fn drop_bucket(&self, bucket: &str) -> Result<bool> {
        let existed = self.engine.drop_bucket(bucket)?;
        debug!(target: "bucketdb::store", bucket, existed, "Dropped bucket");
        Ok(existed)
    }

    pub(crate) fn decode_entry<T: DeserializeOwned>(
        &self,
        bucket: &str,
        key: &[u8],
        bytes: &[u8],
    ) -> Result<T> {
        self.codec
            .decode(bytes)
            .map_err(|e| Error::decoding(bucket, key, e))
    }
}

impl<E: Engine> std::fmt::Debug for Store<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("engine", &self.engine.engine_name())
            .field("location", &self.location)
            .finish()
    }
}
