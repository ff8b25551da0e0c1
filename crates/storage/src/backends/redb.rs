//! Redb storage backend.
//!
//! Each bucket is a redb table of raw byte keys to raw byte values, named
//! after the bucket. redb gives the isolation the bucket accessor relies
//! on: one write transaction at a time, any number of read transactions,
//! each reading the snapshot committed when it began.

use std::path::{Path, PathBuf};

use bucketdb_core::{validate_bucket_name, Error, Result};
use redb::{Database, ReadableTable, TableDefinition, TableError, TableHandle};
use tracing::warn;

use crate::config::{Durability, StoreConfig};
use crate::engine::{BucketRead, BucketWrite, Engine};

type BucketTable<'a> = TableDefinition<'a, &'static [u8], &'static [u8]>;

fn bucket_table(name: &str) -> BucketTable<'_> {
    TableDefinition::new(name)
}

/// A storage engine backed by a redb database file.
///
/// # Example
///
/// ```ignore
/// use bucketdb_storage::{Engine, RedbEngine, StoreConfig};
///
/// let engine = RedbEngine::open(&StoreConfig::new("records.redb"))?;
/// engine.update("Records", |bucket| bucket.put(b"id-1", br#"{"ID":"id-1"}"#))?;
/// ```
pub struct RedbEngine {
    db: Database,
    path: PathBuf,
    durability: Durability,
}

impl RedbEngine {
    /// Open the database file named by `config`, creating it if needed.
    ///
    /// Missing parent directories are created.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for an invalid configuration, [`Error::Io`]
    /// if the parent directory cannot be created and [`Error::Storage`] if
    /// the engine cannot open the file (including when another handle in
    /// this process already holds it).
    pub fn open(config: &StoreConfig) -> Result<Self> {
        config.validate()?;

        if let Some(parent) = config.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let mut builder = Database::builder();
        if let Some(cache_size) = config.cache_size {
            builder.set_cache_size(cache_size);
        }
        let db = builder.create(&config.path).map_err(|e| {
            Error::Storage(format!(
                "failed to open database '{}': {}",
                config.path.display(),
                e
            ))
        })?;

        Ok(Self {
            db,
            path: config.path.clone(),
            durability: config.durability,
        })
    }

    /// Path of the database file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Engine for RedbEngine {
    fn view<T, F>(&self, bucket: &str, f: F) -> Result<T>
    where
        F: FnOnce(Option<&dyn BucketRead>) -> Result<T>,
    {
        validate_bucket_name(bucket)?;
        let tx = self.db.begin_read().map_err(Error::storage)?;

        match tx.open_table(bucket_table(bucket)) {
            Ok(table) => {
                let bucket = RedbBucket(table);
                f(Some(&bucket as &dyn BucketRead))
            }
            // Buckets are created lazily by the first write
            Err(TableError::TableDoesNotExist(_)) => f(None),
            Err(e) => Err(Error::storage(e)),
        }
    }

    fn update<T, F>(&self, bucket: &str, f: F) -> Result<T>
    where
        F: FnOnce(&mut dyn BucketWrite) -> Result<T>,
    {
        validate_bucket_name(bucket)?;
        let mut tx = self.db.begin_write().map_err(Error::storage)?;
        if self.durability == Durability::Eventual {
            tx.set_durability(redb::Durability::Eventual);
        }

        let result = match tx.open_table(bucket_table(bucket)) {
            Ok(table) => {
                let mut bucket = RedbBucket(table);
                f(&mut bucket as &mut dyn BucketWrite)
            }
            Err(e) => Err(Error::storage(e)),
        };

        match result {
            Ok(value) => {
                tx.commit().map_err(Error::storage)?;
                Ok(value)
            }
            Err(e) => {
                if let Err(abort) = tx.abort() {
                    warn!(target: "bucketdb::storage", bucket, error = %abort, "Rollback failed");
                }
                Err(e)
            }
        }
    }

    fn bucket_names(&self) -> Result<Vec<String>> {
        let tx = self.db.begin_read().map_err(Error::storage)?;
        let mut names: Vec<String> = tx
            .list_tables()
            .map_err(Error::storage)?
            .map(|handle| handle.name().to_string())
            .collect();
        names.sort();
        Ok(names)
    }

    fn drop_bucket(&self, bucket: &str) -> Result<bool> {
        validate_bucket_name(bucket)?;
        let tx = self.db.begin_write().map_err(Error::storage)?;
        let existed = tx
            .delete_table(bucket_table(bucket))
            .map_err(Error::storage)?;
        tx.commit().map_err(Error::storage)?;
        Ok(existed)
    }

    fn engine_name(&self) -> &'static str {
        "redb"
    }
}

/// A redb table opened inside a read or write transaction.
struct RedbBucket<T>(T);

impl<T> BucketRead for RedbBucket<T>
where
    T: ReadableTable<&'static [u8], &'static [u8]>,
{
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        let value = self.0.get(key).map_err(Error::storage)?;
        Ok(value.map(|guard| guard.value().to_vec()))
    }

    fn for_each(&self, f: &mut dyn FnMut(&[u8], &[u8]) -> Result<()>) -> Result<()> {
        for entry in self.0.iter().map_err(Error::storage)? {
            let (key, value) = entry.map_err(Error::storage)?;
            f(key.value(), value.value())?;
        }
        Ok(())
    }

    fn len(&self) -> Result<u64> {
        self.0.len().map_err(Error::storage)
    }
}

impl BucketWrite for RedbBucket<redb::Table<'_, &'static [u8], &'static [u8]>> {
    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<()> {
        self.0.insert(key, value).map_err(Error::storage)?;
        Ok(())
    }

    fn delete(&mut self, key: &[u8]) -> Result<bool> {
        let removed = self.0.remove(key).map_err(Error::storage)?;
        Ok(removed.is_some())
    }
}
