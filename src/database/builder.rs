//! # Layer Store Builder
//!
//! `LayerStoreBuilder` configures and opens a [`LayerStore`] with control over
//! access mode, lock waiting and insert batching.
//!
//! ## Configuration Options
//!
//! | Option              | Default | Description                                   |
//! |---------------------|---------|-----------------------------------------------|
//! | `read_only`         | false   | open connections read-only, reject writes     |
//! | `busy_timeout`      | 5 s     | how long to wait on a locked file             |
//! | `insert_batch_rows` | 500     | rows per multi-row INSERT (capped by SQLite)  |
//!
//! ## Usage Examples
//!
//! ```ignore
//! let store = LayerStore::builder()
//!     .path("./layers.sqlite")
//!     .busy_timeout(Duration::from_secs(30))
//!     .open()?;
//!
//! let reader = LayerStore::builder()
//!     .path("./layers.sqlite")
//!     .read_only(true)
//!     .open()?;
//! ```
//!
//! A writable open creates the file and the catalog table when they are
//! missing. A read-only open requires both to exist already.

use super::LayerStore;
use crate::config::StoreConfig;
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Builder for configuring and opening a layer store.
#[derive(Debug, Clone, Default)]
pub struct LayerStoreBuilder {
    path: Option<PathBuf>,
    read_only: Option<bool>,
    busy_timeout: Option<Duration>,
    insert_batch_rows: Option<usize>,
}

impl LayerStoreBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Path of the SQLite file backing the store.
    pub fn path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.path = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn read_only(mut self, read_only: bool) -> Self {
        self.read_only = Some(read_only);
        self
    }

    /// How long a connection waits on a locked file before failing.
    pub fn busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = Some(timeout);
        self
    }

    /// Upper bound on rows bound into one INSERT statement.
    ///
    /// The effective batch is further capped so no statement exceeds SQLite's
    /// bound-variable limit. Zero is treated as one.
    pub fn insert_batch_rows(mut self, rows: usize) -> Self {
        self.insert_batch_rows = Some(rows.max(1));
        self
    }

    /// Assembles the configuration without opening anything.
    pub fn build_config(&self) -> Result<StoreConfig> {
        let path = self
            .path
            .clone()
            .ok_or_else(|| Error::Config("no store path given".to_string()))?;

        let mut config = StoreConfig::new(path);
        if let Some(read_only) = self.read_only {
            config.read_only = read_only;
        }
        if let Some(timeout) = self.busy_timeout {
            config.busy_timeout = timeout;
        }
        if let Some(rows) = self.insert_batch_rows {
            config.insert_batch_rows = rows;
        }
        Ok(config)
    }

    /// Opens the store with the configured settings.
    ///
    /// # Errors
    ///
    /// Returns a store error if no path was given, if the file cannot be
    /// opened, or if a writable open cannot create the catalog table.
    pub fn open(self) -> Result<LayerStore> {
        LayerStore::from_config(self.build_config()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEFAULT_BUSY_TIMEOUT, DEFAULT_INSERT_BATCH_ROWS};
    use crate::error::Error;
    use tempfile::tempdir;

    #[test]
    fn builder_without_path_fails() {
        let result = LayerStoreBuilder::new().open();
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn unset_options_keep_defaults() {
        let config = LayerStoreBuilder::new().path("x.sqlite").build_config().unwrap();

        assert!(!config.read_only);
        assert_eq!(config.busy_timeout, DEFAULT_BUSY_TIMEOUT);
        assert_eq!(config.insert_batch_rows, DEFAULT_INSERT_BATCH_ROWS);
    }

    #[test]
    fn options_are_applied() {
        let config = LayerStoreBuilder::new()
            .path("x.sqlite")
            .read_only(true)
            .busy_timeout(Duration::from_millis(250))
            .insert_batch_rows(0)
            .build_config()
            .unwrap();

        assert!(config.read_only);
        assert_eq!(config.busy_timeout, Duration::from_millis(250));
        assert_eq!(config.insert_batch_rows, 1);
    }

    #[test]
    fn open_applies_config_to_store() {
        let dir = tempdir().unwrap();
        let store = LayerStoreBuilder::new()
            .path(dir.path().join("layers.sqlite"))
            .insert_batch_rows(7)
            .open()
            .unwrap();

        assert_eq!(store.config().insert_batch_rows, 7);
        assert!(!store.is_read_only());
    }
}
