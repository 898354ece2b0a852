//! # UPDATE Operations
//!
//! Positional replacement of one column's values. The i-th value is written
//! to the row with the i-th smallest row identity.

use crate::config::ROWID;
use crate::database::{require_column, row_identities, table_columns, LayerStore};
use crate::error::{Error, Result};
use crate::schema::Catalog;
use crate::sql::builder::build_update_column;
use crate::types::Value;

impl LayerStore {
    /// Overwrites column `column` of layer `name` with `values`, one per row.
    ///
    /// # Errors
    ///
    /// `LengthMismatch` unless `values` has exactly one entry per row.
    pub fn update_column(&self, name: &str, column: &str, values: &[Value]) -> Result<()> {
        self.check_writable("update column")?;

        self.gateway.transaction(|session| {
            Catalog::new(session).require(name)?;
            require_column(&table_columns(session, name)?, name, column)?;

            let keys = row_identities(session, name)?;
            if keys.len() != values.len() {
                return Err(Error::LengthMismatch {
                    expected: keys.len(),
                    found: values.len(),
                });
            }

            session.execute_batch(
                &build_update_column(name, column, ROWID),
                values
                    .iter()
                    .zip(keys)
                    .map(|(value, key)| vec![value.clone(), Value::Int(key)]),
            )?;
            Ok(())
        })
    }
}
