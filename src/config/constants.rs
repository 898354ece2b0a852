//! # Configuration Constants
//!
//! Names and limits shared by the catalog, the query builder and the store
//! gateway. Values that constrain each other are kept together and checked
//! at compile time.
//!
//! ```text
//! SQLITE_MAX_VARIABLES (32766)
//!       │
//!       └─> DEFAULT_INSERT_BATCH_ROWS (500)
//!             One multi-row INSERT binds rows × columns parameters. The
//!             insert path shrinks the batch for wide frames so the product
//!             never exceeds SQLITE_MAX_VARIABLES.
//! ```

use std::time::Duration;

/// Name of the metadata table that tracks every managed layer.
pub const CATALOG_TABLE: &str = "tables_info";

/// Canonical name of SQLite's implicit row identity.
pub const ROWID: &str = "rowid";

/// Every spelling SQLite accepts for the implicit row identity.
pub const ROWID_ALIASES: [&str; 3] = ["rowid", "_rowid_", "oid"];

/// Maximum number of bound parameters in one statement
/// (SQLITE_MAX_VARIABLE_NUMBER for SQLite >= 3.32).
pub const SQLITE_MAX_VARIABLES: usize = 32_766;

/// Default number of rows bound per multi-row INSERT.
pub const DEFAULT_INSERT_BATCH_ROWS: usize = 500;

/// Default time a connection waits on a locked database before failing.
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Separator between row and column counts in the persisted shape.
pub const SHAPE_SEPARATOR: char = 'x';

const _: () = assert!(DEFAULT_INSERT_BATCH_ROWS > 0);
const _: () = assert!(DEFAULT_INSERT_BATCH_ROWS <= SQLITE_MAX_VARIABLES);

/// Returns true if `name` addresses the implicit row identity.
pub fn is_row_identity(name: &str) -> bool {
    ROWID_ALIASES
        .iter()
        .any(|alias| alias.eq_ignore_ascii_case(name))
}
