//! # Type System
//!
//! Value and type vocabularies shared by frames, the query builder and the
//! store gateway.
//!
//! ## Module Structure
//!
//! - `value`: owned cell `Value` with SQLite bind/read support
//! - `data_type`: frame `Dtype` and store `StoreType`
//! - `mapper`: dtype → column definition mapping
//!
//! ## Key Types
//!
//! | Type        | Purpose                                   |
//! |-------------|-------------------------------------------|
//! | `Value`     | One cell, bound as a statement parameter  |
//! | `Dtype`     | Dtype family of a frame column            |
//! | `StoreType` | Declared SQLite type of a layer column    |

mod data_type;
pub mod mapper;
mod value;

pub use data_type::{Dtype, StoreType};
pub use mapper::{column_def_for_new_data, column_defs, store_type_for};
pub use value::Value;
