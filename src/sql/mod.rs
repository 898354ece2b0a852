//! # SQL Construction
//!
//! Stateless translation from layer operations to parameterized SQLite
//! statements.
//!
//! ## Module Organization
//!
//! - `builder`: statement builders and identifier quoting
//! - `select`: column selections, row predicates and column resolution

pub mod builder;
pub mod select;

pub use builder::{quote_ident, Statement};
pub use select::{resolve_columns, ColumnSelection, ColumnSpec, Predicate};
