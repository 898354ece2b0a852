//! # Layer Store
//!
//! `LayerStore` is the façade over one SQLite file. It combines the catalog,
//! the query builder, the type mapper and the store gateway into the layer
//! operations callers use.
//!
//! ## Operation Flow
//!
//! ```text
//! LayerStore::insert("layer1", frame, false)
//!     │
//!     ▼
//! ┌─────────────────────────────────────────────────────┐
//! │ 1. OPEN: gateway opens a fresh connection, BEGIN    │
//! └─────────────────────────────────────────────────────┘
//!     │
//!     ▼
//! ┌─────────────────────────────────────────────────────┐
//! │ 2. CHECK: catalog entry exists, columns line up     │
//! └─────────────────────────────────────────────────────┘
//!     │
//!     ▼
//! ┌─────────────────────────────────────────────────────┐
//! │ 3. BUILD + EXECUTE: parameterized statements        │
//! └─────────────────────────────────────────────────────┘
//!     │
//!     ▼
//! ┌─────────────────────────────────────────────────────┐
//! │ 4. CATALOG: shape / name updated in the same tx     │
//! └─────────────────────────────────────────────────────┘
//!     │
//!     ▼
//! COMMIT (or ROLLBACK on any error), connection closed
//! ```
//!
//! ## Layer Lifecycle
//!
//! ```text
//! Absent ──create──> Created ──insert──> Populated ──(rename, add/drop
//!   ^                   │                    │         column, delete rows)
//!   │                   └───────drop─────────┴──────────────> Absent
//!   └── create on an existing name drops it first (replace)
//! ```
//!
//! ## Operation Groups
//!
//! - this module: opening, catalog metadata (tags, info, shape, listing)
//! - `ddl`: create, rename, rename/add/drop column, drop layer
//! - `dml`: insert, delete rows, replace column values
//! - `query`: column and row selections
//!
//! ## Usage Example
//!
//! ```ignore
//! use omilayers::{Column, ColumnSelection, Frame, LayerStore};
//!
//! let store = LayerStore::open("./layers.sqlite")?;
//! let frame = Frame::from_columns(vec![Column::int("c1", 1..=10)])?;
//! store.create_from_frame("layer1", &frame)?;
//! store.set_tag("layer1", "raw")?;
//!
//! let all = store.select_columns("layer1", &ColumnSelection::all(), None)?;
//! ```

mod builder;
mod ddl;
mod dml;
mod query;

pub use builder::LayerStoreBuilder;

use crate::config::{is_row_identity, StoreConfig};
use crate::error::{Error, Result};
use crate::schema::{Catalog, CatalogEntry, Shape};
use crate::sql::builder::build_table_columns;
use crate::storage::{Gateway, Session};
use crate::types::Value;
use std::path::Path;
use tracing::info;

/// Catalog-consistent layer store over one SQLite file.
#[derive(Debug, Clone)]
pub struct LayerStore {
    gateway: Gateway,
}

impl LayerStore {
    pub fn builder() -> LayerStoreBuilder {
        LayerStoreBuilder::new()
    }

    /// Opens (creating if needed) a writable store at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder().path(path).open()
    }

    /// Opens an existing store without write access.
    pub fn open_read_only<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder().path(path).read_only(true).open()
    }

    pub(crate) fn from_config(config: StoreConfig) -> Result<Self> {
        let is_new = !config.path.exists();
        let read_only = config.read_only;
        let store = Self {
            gateway: Gateway::new(config),
        };

        if read_only {
            store.gateway.with_session(|_| Ok(()))?;
        } else {
            store
                .gateway
                .with_session(|session| Catalog::new(session).ensure_catalog())?;
            if is_new {
                info!(path = %store.path().display(), "created layer store");
            }
        }

        Ok(store)
    }

    pub fn path(&self) -> &Path {
        self.gateway.path()
    }

    pub fn config(&self) -> &StoreConfig {
        self.gateway.config()
    }

    pub fn is_read_only(&self) -> bool {
        self.gateway.config().read_only
    }

    fn check_writable(&self, operation: &'static str) -> Result<()> {
        if self.is_read_only() {
            return Err(Error::ReadOnly { operation });
        }
        Ok(())
    }

    /// Layer names in registration order, optionally limited to one tag.
    pub fn list_tables(&self, tag: Option<&str>) -> Result<Vec<String>> {
        self.gateway
            .with_session(|session| Catalog::new(session).list_tables(tag))
    }

    pub fn exists(&self, name: &str) -> Result<bool> {
        self.gateway
            .with_session(|session| Catalog::new(session).exists(name))
    }

    /// Catalog entries in registration order, optionally limited to one tag.
    pub fn entries(&self, tag: Option<&str>) -> Result<Vec<CatalogEntry>> {
        self.gateway
            .with_session(|session| Catalog::new(session).entries(tag))
    }

    pub fn entry(&self, name: &str) -> Result<CatalogEntry> {
        self.gateway.with_session(|session| {
            Catalog::new(session)
                .entry(name)?
                .ok_or_else(|| Error::unknown_table(name))
        })
    }

    /// Stored shape; `(0, 0)` for a name with no catalog entry.
    pub fn get_shape(&self, name: &str) -> Result<Shape> {
        self.gateway
            .with_session(|session| Catalog::new(session).get_shape(name))
    }

    pub fn get_info(&self, name: &str) -> Result<Option<String>> {
        Ok(self.entry(name)?.info)
    }

    pub fn get_tag(&self, name: &str) -> Result<Option<String>> {
        Ok(self.entry(name)?.tag)
    }

    pub fn set_info(&self, name: &str, info: &str) -> Result<()> {
        self.check_writable("set info")?;
        self.gateway
            .with_session(|session| Catalog::new(session).set_info(name, info))
    }

    pub fn set_tag(&self, name: &str, tag: &str) -> Result<()> {
        self.check_writable("set tag")?;
        self.gateway
            .with_session(|session| Catalog::new(session).set_tag(name, tag))
    }

    /// Physical column names of a layer, in column order.
    pub fn column_names(&self, name: &str) -> Result<Vec<String>> {
        self.gateway.with_session(|session| {
            Catalog::new(session).require(name)?;
            Ok(table_columns(session, name)?
                .into_iter()
                .map(|c| c.name)
                .collect())
        })
    }
}

/// One physical column of a layer table.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PhysicalColumn {
    pub name: String,
    pub declared: String,
}

pub(crate) fn table_columns(session: &Session<'_>, table: &str) -> Result<Vec<PhysicalColumn>> {
    Ok(session
        .fetch_all(&build_table_columns(table))?
        .into_iter()
        .map(|row| {
            let mut fields = row.into_iter();
            let name = match fields.next() {
                Some(Value::Text(s)) => s,
                _ => String::new(),
            };
            let declared = match fields.next() {
                Some(Value::Text(s)) => s,
                _ => String::new(),
            };
            PhysicalColumn { name, declared }
        })
        .collect())
}

pub(crate) fn column_name_list(columns: &[PhysicalColumn]) -> Vec<String> {
    columns.iter().map(|c| c.name.clone()).collect()
}

pub(crate) fn require_column(
    columns: &[PhysicalColumn],
    table: &str,
    column: &str,
) -> Result<()> {
    if columns.iter().any(|c| c.name == column) {
        Ok(())
    } else {
        Err(Error::unknown_column(table, column))
    }
}

pub(crate) fn check_column_name(column: &str) -> Result<()> {
    if is_row_identity(column) {
        return Err(Error::ReservedColumn {
            column: column.to_string(),
        });
    }
    Ok(())
}

/// Row identities of a layer in storage order.
pub(crate) fn row_identities(session: &Session<'_>, table: &str) -> Result<Vec<i64>> {
    let stmt = crate::sql::builder::build_select_columns(table, &[crate::config::ROWID], None);
    Ok(session
        .fetch_all(&stmt)?
        .into_iter()
        .filter_map(|row| row.first().and_then(Value::as_i64))
        .collect())
}
