//! # DML Operations Module
//!
//! Layer operations that change rows but not columns: INSERT, DELETE and
//! UPDATE. Each one runs in a single store transaction together with the
//! catalog shape update it implies.
//!
//! ## Operation Flow
//!
//! ```text
//! ┌───────────────────────────┐
//! │ Validate                  │  layer registered, columns resolved
//! └─────────────┬─────────────┘
//!               ▼
//! ┌───────────────────────────┐
//! │ Execute                   │  parameterized, chunked where needed
//! └─────────────┬─────────────┘
//!               ▼
//! ┌───────────────────────────┐
//! │ Catalog                   │  shape = (rows ± n, physical columns)
//! └───────────────────────────┘
//! ```
//!
//! ## Module Structure
//!
//! - `insert`: frame appends, shared with layer creation
//! - `delete`: row removal by key
//! - `update`: positional column replacement

mod delete;
mod insert;
mod update;

pub(crate) use insert::insert_records;
