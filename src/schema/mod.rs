//! # Layer Catalog
//!
//! Metadata for every managed layer lives in one side table inside the same
//! SQLite file as the layers themselves:
//!
//! ```text
//! store.sqlite
//! ├── tables_info          # catalog: name, tag, shape, info
//! ├── layer1               # managed layer
//! └── layer2               # managed layer
//! ```
//!
//! ## Consistency
//!
//! A catalog entry exists exactly when its layer table exists. The layer
//! store keeps the two in step by running every operation that touches both
//! inside one transaction (see [`crate::database`]).
//!
//! ## Module Organization
//!
//! - `catalog`: `Catalog`, `CatalogEntry`, `Shape`

pub mod catalog;

pub use catalog::{Catalog, CatalogEntry, Shape};
