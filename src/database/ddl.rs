//! # DDL Operations Module
//!
//! Layer operations that change which layers exist or which columns they
//! have. Each one runs in a single store transaction that covers both the
//! data table and its catalog entry, so the two never disagree after a
//! failure.
//!
//! ## Supported Operations
//!
//! | Operation           | Data table                   | Catalog                    |
//! |---------------------|------------------------------|----------------------------|
//! | `create_from_frame` | drop, CREATE, INSERT rows    | re-register, shape R×C     |
//! | `rename`            | ALTER TABLE RENAME           | key moves to the new name  |
//! | `rename_column`     | ALTER TABLE RENAME COLUMN    | unchanged                  |
//! | `add_column`        | ALTER TABLE ADD, UPDATE rows | columns + 1                |
//! | `drop_column`       | ALTER TABLE DROP COLUMN      | columns - 1                |
//! | `drop_table`        | DROP TABLE IF EXISTS         | entry removed              |
//!
//! ## Replace Semantics
//!
//! Creating a layer under an existing name replaces it. The old table is
//! dropped inside the same transaction, and the tag and description of the
//! replaced entry are carried over to the new one. If any step fails the
//! transaction rolls back and the previous layer is left exactly as it was.
//!
//! ## Column Addition
//!
//! New column values are paired positionally with row keys:
//!
//! ```text
//! where_col = rowid   keys = existing row identities, ascending
//! where_col = "c1"    keys = caller-supplied where_values (required)
//!
//! UPDATE "t" SET "new" = ? WHERE <key> = ?    bound once per (value, key)
//! ```

use super::{check_column_name, require_column, row_identities, table_columns, LayerStore};
use crate::config::{is_row_identity, CATALOG_TABLE};
use crate::error::{Error, Result};
use crate::frame::Frame;
use crate::schema::{Catalog, Shape};
use crate::sql::builder::{
    build_add_column, build_create, build_drop, build_drop_column, build_rename,
    build_rename_column, build_update_column,
};
use crate::types::{column_def_for_new_data, column_defs, Value};
use tracing::info;

fn check_table_name(name: &str) -> Result<()> {
    if name.eq_ignore_ascii_case(CATALOG_TABLE) {
        return Err(Error::ReservedTable {
            table: name.to_string(),
        });
    }
    Ok(())
}

impl LayerStore {
    /// Creates (or replaces) layer `name` from a frame.
    ///
    /// Columns and their store types are derived from the frame. Every row of
    /// the frame is inserted and the catalog records its shape.
    ///
    /// # Errors
    ///
    /// Any failure after the read-only check is wrapped in
    /// [`Error::TableCreation`]; nothing is left behind in that case.
    pub fn create_from_frame(&self, name: &str, frame: &Frame) -> Result<()> {
        self.check_writable("create layer")?;

        self.try_create(name, frame)
            .map_err(|source| Error::TableCreation {
                table: name.to_string(),
                source: Box::new(source),
            })?;

        info!(
            layer = name,
            rows = frame.num_rows(),
            cols = frame.num_columns(),
            "created layer"
        );
        Ok(())
    }

    fn try_create(&self, name: &str, frame: &Frame) -> Result<()> {
        check_table_name(name)?;
        if frame.num_columns() == 0 {
            return Err(Error::InvalidFrame("frame has no columns".to_string()));
        }
        for column in frame.columns() {
            check_column_name(column.name())?;
        }

        let columns = frame.column_names();
        let config = self.config();

        self.gateway.transaction(|session| {
            let catalog = Catalog::new(session);
            let replaced = catalog.entry(name)?;

            session.execute(&build_drop(name))?;
            catalog.unregister_table(name)?;
            catalog.register_table(name, Shape::new(frame.num_rows(), frame.num_columns()))?;

            if let Some(entry) = replaced {
                if let Some(tag) = entry.tag.as_deref() {
                    catalog.set_tag(name, tag)?;
                }
                if let Some(info) = entry.info.as_deref() {
                    catalog.set_info(name, info)?;
                }
            }

            session.execute(&build_create(name, &column_defs(frame)))?;
            super::dml::insert_records(session, config, name, &columns, frame)?;
            Ok(())
        })
    }

    /// Renames a layer. The catalog entry keeps its tag, shape and info.
    pub fn rename(&self, name: &str, new_name: &str) -> Result<()> {
        self.check_writable("rename layer")?;
        check_table_name(new_name)?;

        self.gateway.transaction(|session| {
            let catalog = Catalog::new(session);
            catalog.require(name)?;
            if catalog.exists(new_name)? {
                return Err(Error::DuplicateTable {
                    table: new_name.to_string(),
                });
            }

            session.execute(&build_rename(name, new_name))?;
            catalog.rename_entry(name, new_name)
        })?;

        info!(layer = name, new_name, "renamed layer");
        Ok(())
    }

    pub fn rename_column(&self, name: &str, column: &str, new_name: &str) -> Result<()> {
        self.check_writable("rename column")?;
        check_column_name(new_name)?;

        self.gateway.transaction(|session| {
            Catalog::new(session).require(name)?;
            require_column(&table_columns(session, name)?, name, column)?;
            session.execute(&build_rename_column(name, column, new_name))?;
            Ok(())
        })
    }

    /// Adds column `column` and fills it with `values`.
    ///
    /// With `where_col` naming the row identity, values are paired with the
    /// existing rows in row-identity order. With any other key column,
    /// `where_values` must supply one key per value; rows whose key is not
    /// listed keep NULL.
    pub fn add_column(
        &self,
        name: &str,
        column: &str,
        values: &[Value],
        where_col: &str,
        where_values: Option<&[Value]>,
    ) -> Result<()> {
        self.check_writable("add column")?;
        check_column_name(column)?;

        self.gateway.transaction(|session| {
            let catalog = Catalog::new(session);
            catalog.require(name)?;
            let physical = table_columns(session, name)?;

            let keys = if is_row_identity(where_col) {
                row_identities(session, name)?
                    .into_iter()
                    .map(Value::Int)
                    .collect::<Vec<_>>()
            } else {
                let keys = where_values.ok_or_else(|| Error::MissingReference {
                    table: name.to_string(),
                    column: where_col.to_string(),
                })?;
                require_column(&physical, name, where_col)?;
                keys.to_vec()
            };

            if keys.len() != values.len() {
                return Err(Error::LengthMismatch {
                    expected: keys.len(),
                    found: values.len(),
                });
            }

            session.execute(&build_add_column(name, column, column_def_for_new_data(values)))?;
            session.execute_batch(
                &build_update_column(name, column, where_col),
                values
                    .iter()
                    .zip(keys)
                    .map(|(value, key)| vec![value.clone(), key]),
            )?;

            let shape = catalog.get_shape(name)?;
            catalog.update_shape(name, shape.rows, physical.len() + 1)
        })
    }

    pub fn drop_column(&self, name: &str, column: &str) -> Result<()> {
        self.check_writable("drop column")?;

        self.gateway.transaction(|session| {
            let catalog = Catalog::new(session);
            catalog.require(name)?;
            let physical = table_columns(session, name)?;
            require_column(&physical, name, column)?;

            session.execute(&build_drop_column(name, column))?;

            let shape = catalog.get_shape(name)?;
            catalog.update_shape(name, shape.rows, physical.len() - 1)
        })
    }

    /// Drops a layer and its catalog entry. Dropping a missing layer is not
    /// an error.
    pub fn drop_table(&self, name: &str) -> Result<()> {
        self.check_writable("drop layer")?;
        check_table_name(name)?;

        self.gateway.transaction(|session| {
            session.execute(&build_drop(name))?;
            Catalog::new(session).unregister_table(name)
        })?;

        info!(layer = name, "dropped layer");
        Ok(())
    }
}
