//! # Type Mapper
//!
//! Maps frame dtypes onto the store's column-type vocabulary. Consulted only
//! when a layer is created and when a column is added.
//!
//! | Dtype     | Store type |
//! |-----------|------------|
//! | `Int64`   | INTEGER    |
//! | `Float64` | REAL       |
//! | `Bool`    | INTEGER    |
//! | `Text`    | TEXT       |
//! | `Blob`    | BLOB       |
//! | `Object`  | TEXT       |
//!
//! Both entry points are total: anything unrecognized maps to TEXT.

use super::{Dtype, StoreType, Value};
use crate::frame::Frame;
use crate::sql::quote_ident;

pub fn store_type_for(dtype: Dtype) -> StoreType {
    match dtype {
        Dtype::Int64 | Dtype::Bool => StoreType::Integer,
        Dtype::Float64 => StoreType::Real,
        Dtype::Blob => StoreType::Blob,
        Dtype::Text | Dtype::Object => StoreType::Text,
    }
}

/// One `"name" TYPE` fragment per frame column, in frame column order.
pub fn column_defs(frame: &Frame) -> Vec<String> {
    frame
        .columns()
        .iter()
        .map(|col| format!("{} {}", quote_ident(col.name()), store_type_for(col.dtype())))
        .collect()
}

/// Store type for a column about to be filled with `values`.
pub fn column_def_for_new_data(values: &[Value]) -> StoreType {
    store_type_for(Dtype::infer(values))
}
