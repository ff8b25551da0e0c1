//! Store configuration
//!
//! A store needs one thing to open: the path of its database file. It can
//! come from three places:
//!
//! - `StoreConfig::new(path)` in code
//! - the `BUCKETDB_PATH` environment variable (`StoreConfig::from_env()`),
//!   falling back to `bucketdb.redb` when unset or empty
//! - a TOML file (`StoreConfig::from_file(path)`)

use bucketdb_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming the database file.
pub const PATH_ENV_VAR: &str = "BUCKETDB_PATH";

/// Database file used when nothing else is configured.
pub const DEFAULT_PATH: &str = "bucketdb.redb";

/// Commit durability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Durability {
    /// fsync on every commit; a committed write survives a crash
    #[default]
    Immediate,
    /// Commits are not fsynced; a crash may lose the latest commits
    Eventual,
}

/// Store configuration.
///
/// # Example
///
/// ```toml
/// # Database file, created on first open
/// path = "/var/lib/app/records.redb"
///
/// # Page cache in bytes (optional, engine default when absent)
/// cache_size = 67108864
///
/// # "immediate" (default) or "eventual"
/// durability = "immediate"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Database file path.
    #[serde(default = "default_path")]
    pub path: PathBuf,
    /// Engine page cache size in bytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_size: Option<usize>,
    /// Commit durability.
    #[serde(default)]
    pub durability: Durability,
}

fn default_path() -> PathBuf {
    PathBuf::from(DEFAULT_PATH)
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(default_path())
    }
}

impl StoreConfig {
    /// Configuration for the database file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cache_size: None,
            durability: Durability::default(),
        }
    }

    /// Set the engine page cache size.
    #[must_use]
    pub fn with_cache_size(mut self, bytes: usize) -> Self {
        self.cache_size = Some(bytes);
        self
    }

    /// Set commit durability.
    #[must_use]
    pub fn with_durability(mut self, durability: Durability) -> Self {
        self.durability = durability;
        self
    }

    /// Configuration from the `BUCKETDB_PATH` environment variable.
    pub fn from_env() -> Self {
        Self::from_env_value(std::env::var(PATH_ENV_VAR).ok().as_deref())
    }

    /// Configuration from an already-read `BUCKETDB_PATH` value.
    ///
    /// `None` and empty values select [`DEFAULT_PATH`].
    pub fn from_env_value(value: Option<&str>) -> Self {
        match value {
            Some(path) if !path.trim().is_empty() => Self::new(path),
            _ => Self::default(),
        }
    }

    /// Read and parse config from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the file cannot be read, parsed or
    /// validated.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let config: StoreConfig = toml::from_str(&content).map_err(|e| {
            Error::Config(format!(
                "Failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize this config to TOML and write it to `path`.
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Check the configuration can be used to open a store.
    pub fn validate(&self) -> Result<()> {
        if self.path.as_os_str().is_empty() {
            return Err(Error::Config("database path is empty".to_string()));
        }
        if self.cache_size == Some(0) {
            return Err(Error::Config("cache_size must be positive".to_string()));
        }
        Ok(())
    }
}
