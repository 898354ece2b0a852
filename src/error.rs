//! # Error Types
//!
//! Every fallible operation in the crate returns [`Result<T>`], an alias over
//! the typed [`Error`] enum. Callers can match on the variant to learn which
//! table, column or operation failed.
//!
//! ## Taxonomy
//!
//! | Variant            | Raised when                                              |
//! |--------------------|----------------------------------------------------------|
//! | `UnknownTable`     | the referenced layer has no catalog entry                |
//! | `DuplicateTable`   | a name is registered or renamed onto an existing layer   |
//! | `UnknownColumn`    | a column selection or key names a missing column         |
//! | `ColumnMismatch`   | an insert's columns do not match the stored layer        |
//! | `MissingReference` | add-column keyed by a data column without key values     |
//! | `LengthMismatch`   | positional values do not line up with their keys         |
//! | `ReservedColumn`   | a data column would shadow the row identity              |
//! | `ReservedTable`    | a layer name collides with the catalog table             |
//! | `InvalidFrame`     | a frame cannot be built or stored as given               |
//! | `CorruptCatalog`   | a catalog shape cannot be parsed                         |
//! | `ReadOnly`         | a mutating operation runs against a read-only store      |
//! | `Config`           | the store settings are incomplete or inconsistent        |
//! | `TableCreation`    | creating a layer failed; the transaction was rolled back |
//! | `Store`            | any other SQLite failure (I/O, locking, malformed SQL)   |
//!
//! Store failures pass through unmodified. The only operation that wraps its
//! failures is layer creation, so callers can tell a failed create (which
//! leaves no table and no catalog entry behind) from other store errors.

use thiserror::Error;

/// Result type for layer store operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the layer store.
#[derive(Debug, Error)]
pub enum Error {
    /// The referenced layer has no catalog entry.
    #[error("layer '{table}' does not exist")]
    UnknownTable { table: String },

    /// A layer with this name is already registered.
    #[error("layer '{table}' already exists")]
    DuplicateTable { table: String },

    /// A referenced column is not part of the layer.
    #[error("column '{column}' not found in layer '{table}'")]
    UnknownColumn { table: String, column: String },

    /// The columns of an insert do not match the stored layer.
    #[error("columns of layer '{table}' are {expected:?}, got {found:?}")]
    ColumnMismatch {
        table: String,
        expected: Vec<String>,
        found: Vec<String>,
    },

    /// Add-column keyed by a data column was called without key values.
    #[error("adding a column to layer '{table}' keyed by '{column}' requires reference values")]
    MissingReference { table: String, column: String },

    /// Positional values and their keys have different lengths.
    #[error("expected {expected} values, got {found}")]
    LengthMismatch { expected: usize, found: usize },

    /// A column name collides with the implicit row identity.
    #[error("column name '{column}' is reserved for the row identity")]
    ReservedColumn { column: String },

    /// A layer name collides with the catalog table.
    #[error("layer name '{table}' is reserved for the catalog")]
    ReservedTable { table: String },

    /// A frame cannot be constructed or stored as given.
    #[error("invalid frame: {0}")]
    InvalidFrame(String),

    /// A catalog row holds a shape that cannot be parsed.
    #[error("catalog entry for '{table}' has malformed shape '{shape}'")]
    CorruptCatalog { table: String, shape: String },

    /// A mutating operation was attempted on a read-only store.
    #[error("cannot {operation}: store is opened read-only")]
    ReadOnly { operation: &'static str },

    /// The store settings are incomplete or inconsistent.
    #[error("invalid store configuration: {0}")]
    Config(String),

    /// Creating a layer failed and was rolled back.
    #[error("failed to create layer '{table}': {source}")]
    TableCreation {
        table: String,
        #[source]
        source: Box<Error>,
    },

    /// Any other failure of the backing store.
    #[error("store error: {0}")]
    Store(#[from] rusqlite::Error),
}

impl Error {
    pub(crate) fn unknown_table(table: &str) -> Self {
        Error::UnknownTable {
            table: table.to_string(),
        }
    }

    pub(crate) fn unknown_column(table: &str, column: &str) -> Self {
        Error::UnknownColumn {
            table: table.to_string(),
            column: column.to_string(),
        }
    }

    /// Returns true if the error is, or wraps, a SQLite constraint violation.
    pub fn is_constraint_violation(&self) -> bool {
        match self {
            Error::Store(rusqlite::Error::SqliteFailure(err, _)) => {
                err.code == rusqlite::ErrorCode::ConstraintViolation
            }
            Error::TableCreation { source, .. } => source.is_constraint_violation(),
            _ => false,
        }
    }
}
