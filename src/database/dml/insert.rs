//! # INSERT Operations
//!
//! Appends the rows of a frame to an existing layer.
//!
//! ## Column Alignment
//!
//! | `ordered` | Frame columns                        | Bound as                     |
//! |-----------|--------------------------------------|------------------------------|
//! | false     | same set as the layer, any order     | reordered to physical order  |
//! | true      | same count as the layer              | positionally, names ignored  |
//!
//! Anything else is a `ColumnMismatch`.
//!
//! ## Batching
//!
//! Rows are bound into multi-row `INSERT .. VALUES (..), (..)` statements.
//! Full chunks reuse one prepared statement; the remainder gets its own.
//! The chunk size is `insert_batch_rows`, lowered as needed so that
//! `rows × columns` stays within SQLite's bound-variable limit.

use crate::config::StoreConfig;
use crate::database::{column_name_list, table_columns, LayerStore};
use crate::error::{Error, Result};
use crate::frame::Frame;
use crate::schema::Catalog;
use crate::sql::builder::build_insert;
use crate::sql::Statement;
use crate::storage::Session;
use crate::types::Value;
use tracing::debug;

/// Inserts every row of `frame` into `table` under `columns`, returning the
/// number of rows written.
pub(crate) fn insert_records(
    session: &Session<'_>,
    config: &StoreConfig,
    table: &str,
    columns: &[String],
    frame: &Frame,
) -> Result<usize> {
    let records: Vec<Vec<Value>> = frame.records().collect();
    if records.is_empty() {
        return Ok(0);
    }

    let chunk = config.rows_per_insert(columns.len());
    let full = records.len() / chunk * chunk;
    let (head, tail) = records.split_at(full);

    if !head.is_empty() {
        session.execute_batch(
            &build_insert(table, columns, chunk),
            head.chunks(chunk).map(|rows| rows.concat()),
        )?;
    }
    if !tail.is_empty() {
        session.execute(&Statement::new(
            build_insert(table, columns, tail.len()),
            tail.concat(),
        ))?;
    }

    debug!(table, rows = records.len(), chunk, "inserted rows");
    Ok(records.len())
}

impl LayerStore {
    /// Appends the rows of `frame` to layer `name` and returns how many were
    /// written.
    ///
    /// The catalog row count grows by the same amount in the same
    /// transaction.
    pub fn insert(&self, name: &str, frame: &Frame, ordered: bool) -> Result<usize> {
        self.check_writable("insert")?;
        let config = self.config();

        self.gateway.transaction(|session| {
            let catalog = Catalog::new(session);
            catalog.require(name)?;
            let physical = column_name_list(&table_columns(session, name)?);

            let mismatch = || Error::ColumnMismatch {
                table: name.to_string(),
                expected: physical.clone(),
                found: frame.column_names(),
            };

            let written = if ordered {
                if frame.num_columns() != physical.len() {
                    return Err(mismatch());
                }
                insert_records(session, config, name, &physical, frame)?
            } else {
                let aligned = frame.reordered(physical.as_slice()).ok_or_else(mismatch)?;
                insert_records(session, config, name, &physical, &aligned)?
            };

            let shape = catalog.get_shape(name)?;
            catalog.update_shape(name, shape.rows + written, physical.len())?;
            Ok(written)
        })
    }
}
