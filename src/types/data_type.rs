//! # Frame and Store Type Vocabularies
//!
//! Two small enums describe column types on either side of the store
//! boundary:
//!
//! - [`Dtype`]: the dtype family of an in-memory frame column.
//! - [`StoreType`]: the SQLite column type a layer column is declared with.
//!
//! ## Type Affinity
//!
//! Frames read back from the store take their dtype from the declared column
//! type, following SQLite's affinity rules (first match wins):
//!
//! | Declared type contains   | Dtype     |
//! |--------------------------|-----------|
//! | `INT`                    | `Int64`   |
//! | `CHAR`, `CLOB`, `TEXT`   | `Text`    |
//! | `BLOB` or empty          | `Blob`    |
//! | `REAL`, `FLOA`, `DOUB`   | `Float64` |
//! | anything else            | `Object`  |

use super::Value;
use std::fmt;

/// Dtype family of a frame column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dtype {
    Int64,
    Float64,
    Bool,
    Text,
    Blob,
    /// Mixed or unrecognized values.
    Object,
}

impl Dtype {
    /// Infers the dtype of a value sequence. Nulls are ignored; an empty or
    /// all-null sequence is `Object`.
    pub fn infer(values: &[Value]) -> Dtype {
        let mut ints = 0usize;
        let mut floats = 0usize;
        let mut bools = 0usize;
        let mut texts = 0usize;
        let mut blobs = 0usize;

        for value in values {
            match value {
                Value::Null => {}
                Value::Int(_) => ints += 1,
                Value::Float(_) => floats += 1,
                Value::Bool(_) => bools += 1,
                Value::Text(_) => texts += 1,
                Value::Blob(_) => blobs += 1,
            }
        }

        let non_null = ints + floats + bools + texts + blobs;
        if non_null == 0 {
            Dtype::Object
        } else if ints == non_null {
            Dtype::Int64
        } else if bools == non_null {
            Dtype::Bool
        } else if ints + floats == non_null {
            Dtype::Float64
        } else if texts == non_null {
            Dtype::Text
        } else if blobs == non_null {
            Dtype::Blob
        } else {
            Dtype::Object
        }
    }

    /// Dtype for a column read back from the store with the given declared type.
    pub fn from_declared(declared: &str) -> Dtype {
        let upper = declared.to_ascii_uppercase();

        if upper.contains("INT") {
            Dtype::Int64
        } else if upper.contains("CHAR") || upper.contains("CLOB") || upper.contains("TEXT") {
            Dtype::Text
        } else if upper.contains("BLOB") || upper.trim().is_empty() {
            Dtype::Blob
        } else if upper.contains("REAL") || upper.contains("FLOA") || upper.contains("DOUB") {
            Dtype::Float64
        } else {
            Dtype::Object
        }
    }
}

impl fmt::Display for Dtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Dtype::Int64 => "int64",
            Dtype::Float64 => "float64",
            Dtype::Bool => "bool",
            Dtype::Text => "text",
            Dtype::Blob => "blob",
            Dtype::Object => "object",
        };
        f.write_str(name)
    }
}

/// SQLite column type a layer column is declared with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreType {
    Integer,
    Real,
    Text,
    Blob,
}

impl StoreType {
    pub fn as_sql(&self) -> &'static str {
        match self {
            StoreType::Integer => "INTEGER",
            StoreType::Real => "REAL",
            StoreType::Text => "TEXT",
            StoreType::Blob => "BLOB",
        }
    }
}

impl fmt::Display for StoreType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}
