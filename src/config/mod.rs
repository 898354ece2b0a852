//! # Store Configuration
//!
//! [`StoreConfig`] carries the per-store settings that every connection the
//! gateway opens is configured with. It is normally assembled through
//! [`LayerStoreBuilder`](crate::database::LayerStoreBuilder) rather than by
//! hand.
//!
//! | Setting             | Default | Effect                                       |
//! |---------------------|---------|----------------------------------------------|
//! | `read_only`         | false   | open connections read-only, reject writes    |
//! | `busy_timeout`      | 5 s     | wait on a locked file before failing         |
//! | `insert_batch_rows` | 500     | rows bound per multi-row INSERT statement    |
//!
//! ## Module Organization
//!
//! - [`constants`]: shared names and limits

pub mod constants;
pub use constants::*;

use std::path::{Path, PathBuf};
use std::time::Duration;

/// Settings for a single store file.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreConfig {
    pub path: PathBuf,
    pub read_only: bool,
    pub busy_timeout: Duration,
    pub insert_batch_rows: usize,
}

impl StoreConfig {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            read_only: false,
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
            insert_batch_rows: DEFAULT_INSERT_BATCH_ROWS,
        }
    }

    /// Rows per INSERT for a frame of `columns` columns, capped so the
    /// statement stays under the bound-parameter limit.
    pub fn rows_per_insert(&self, columns: usize) -> usize {
        let by_variables = SQLITE_MAX_VARIABLES / columns.max(1);
        self.insert_batch_rows.min(by_variables).max(1)
    }
}
