//! # omilayers - Catalog-Consistent Layer Store
//!
//! omilayers keeps named tables ("layers") of tabular data in a single SQLite
//! file and moves them in and out of an in-memory [`Frame`]. Alongside the
//! layers it maintains a catalog table recording each layer's tag, shape and
//! free-text description, and keeps that catalog in step with the data.
//!
//! ## Quick Start
//!
//! ```ignore
//! use omilayers::{Column, ColumnSelection, Frame, LayerStore, Predicate};
//!
//! let store = LayerStore::open("./layers.sqlite")?;
//!
//! let frame = Frame::from_columns(vec![
//!     Column::int("c1", 1..=10),
//!     Column::int("c2", 101..=110),
//!     Column::int("c3", 201..=210),
//! ])?;
//! store.create_from_frame("layer1", &frame)?;
//! store.set_info("layer1", "first ten samples")?;
//!
//! let rows = store.select_rows(
//!     "layer1",
//!     &ColumnSelection::all(),
//!     "rowid",
//!     &Predicate::range(2, 5),
//! )?;
//! assert_eq!(rows.index(), &[2, 3, 4]);
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │        LayerStore (database)        │
//! ├──────────────────┬──────────────────┤
//! │ Catalog (schema) │ Query Builder    │
//! │                  │ (sql)            │
//! ├──────────────────┴──────────────────┤
//! │  Type Mapper (types) │ Frame (frame)│
//! ├─────────────────────────────────────┤
//! │       Store Gateway (storage)       │
//! ├─────────────────────────────────────┤
//! │            SQLite (rusqlite)        │
//! └─────────────────────────────────────┘
//! ```
//!
//! ## File Layout
//!
//! ```text
//! layers.sqlite
//! ├── tables_info    # catalog: name, tag, shape "RxC", info
//! ├── layer1         # one plain table per layer
//! └── layer2
//! ```
//!
//! ## Module Overview
//!
//! - [`database`]: the `LayerStore` façade and its builder
//! - [`schema`]: the catalog table
//! - [`sql`]: statement building and selection resolution
//! - [`storage`]: per-operation connections and transactions
//! - [`types`]: cell values, dtypes and the dtype → store type mapping
//! - [`frame`]: the in-memory dataframe
//! - [`config`]: store settings and shared constants
//! - [`cli`]: interactive inspector used by the `omilayers` binary

pub mod cli;
pub mod config;
pub mod database;
pub mod error;
pub mod frame;
pub mod schema;
pub mod sql;
pub mod storage;
pub mod types;

pub use config::StoreConfig;
pub use database::{LayerStore, LayerStoreBuilder};
pub use error::{Error, Result};
pub use frame::{Column, Frame};
pub use schema::{CatalogEntry, Shape};
pub use sql::{ColumnSelection, ColumnSpec, Predicate};
pub use types::{Dtype, StoreType, Value};
