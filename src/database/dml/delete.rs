//! # DELETE Operations
//!
//! Removes rows from a layer by key. A single key value becomes `= ?`; a
//! list becomes `IN (..)`. An empty list deletes nothing and leaves the
//! catalog untouched.

use crate::config::is_row_identity;
use crate::database::{require_column, table_columns, LayerStore};
use crate::error::Result;
use crate::schema::Catalog;
use crate::sql::builder::build_delete;
use crate::types::Value;
use tracing::debug;

impl LayerStore {
    /// Deletes the rows of layer `name` whose `where_col` equals one of
    /// `values`, returning how many were removed.
    pub fn delete_rows(&self, name: &str, where_col: &str, values: &[Value]) -> Result<usize> {
        self.check_writable("delete rows")?;

        self.gateway.transaction(|session| {
            let catalog = Catalog::new(session);
            catalog.require(name)?;
            let physical = table_columns(session, name)?;
            if !is_row_identity(where_col) {
                require_column(&physical, name, where_col)?;
            }
            if values.is_empty() {
                return Ok(0);
            }

            let deleted = session.execute(&build_delete(name, where_col, values))?;

            let shape = catalog.get_shape(name)?;
            catalog.update_shape(name, shape.rows.saturating_sub(deleted), physical.len())?;
            debug!(layer = name, deleted, "deleted rows");
            Ok(deleted)
        })
    }
}
