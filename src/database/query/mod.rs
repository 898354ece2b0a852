//! # Query Module
//!
//! Read operations over a layer. Every result is a [`Frame`] whose index is
//! the row identity of each returned row.
//!
//! ## Addressing
//!
//! ```text
//! select_columns(name, selection, limit)
//!     SELECT rowid, <resolved columns> FROM "name" [LIMIT ?]
//!
//! select_rows(name, selection, where_col, predicate)
//!     SELECT rowid, [where_col,] <resolved columns> FROM "name" WHERE <predicate>
//! ```
//!
//! In `select_rows` a data key column leads the output and is not repeated
//! if the selection also names it. When the key is the row identity it is
//! only the index.
//!
//! Open bounds of a row-identity range are resolved against the layer first
//! (see `helpers::resolve_identity_range`); open bounds on data columns stay
//! unconstrained.
//!
//! ## Module Structure
//!
//! - `helpers`: frame assembly and row-identity range resolution

mod helpers;

use crate::config::{is_row_identity, ROWID};
use crate::database::{column_name_list, require_column, table_columns, LayerStore};
use crate::error::Result;
use crate::frame::Frame;
use crate::schema::Catalog;
use crate::sql::builder::{build_select_columns, build_select_rows};
use crate::sql::{resolve_columns, ColumnSelection, Predicate};
use crate::types::Value;
use helpers::{assemble_frame, resolve_identity_range};

fn with_rowid(columns: &[String]) -> Vec<String> {
    std::iter::once(ROWID.to_string())
        .chain(columns.iter().cloned())
        .collect()
}

impl LayerStore {
    /// Reads the selected columns of every row, up to `limit` rows.
    pub fn select_columns(
        &self,
        name: &str,
        selection: &ColumnSelection,
        limit: Option<usize>,
    ) -> Result<Frame> {
        self.gateway.with_session(|session| {
            Catalog::new(session).require(name)?;
            let physical = table_columns(session, name)?;
            let columns = resolve_columns(selection, name, &column_name_list(&physical))?;

            let rows = session.fetch_all(&build_select_columns(name, &with_rowid(&columns), limit))?;
            assemble_frame(&physical, &columns, rows)
        })
    }

    /// Reads the selected columns of the rows whose `where_col` satisfies
    /// `predicate`.
    pub fn select_rows(
        &self,
        name: &str,
        selection: &ColumnSelection,
        where_col: &str,
        predicate: &Predicate,
    ) -> Result<Frame> {
        self.gateway.with_session(|session| {
            Catalog::new(session).require(name)?;
            let physical = table_columns(session, name)?;
            let resolved = resolve_columns(selection, name, &column_name_list(&physical))?;

            let (columns, predicate) = if is_row_identity(where_col) {
                (resolved, resolve_identity_range(session, name, predicate)?)
            } else {
                require_column(&physical, name, where_col)?;
                let columns = std::iter::once(where_col.to_string())
                    .chain(resolved.into_iter().filter(|c| c != where_col))
                    .collect::<Vec<_>>();
                (columns, predicate.clone())
            };

            let stmt = build_select_rows(name, &with_rowid(&columns), where_col, &predicate);
            let rows = session.fetch_all(&stmt)?;
            assemble_frame(&physical, &columns, rows)
        })
    }

    /// Projects two columns into `(key, value)` pairs in row-identity order.
    ///
    /// Either column may be the row identity.
    pub fn select_pairs(
        &self,
        name: &str,
        key_col: &str,
        value_col: &str,
    ) -> Result<Vec<(Value, Value)>> {
        self.gateway.with_session(|session| {
            Catalog::new(session).require(name)?;
            let physical = table_columns(session, name)?;
            for column in [key_col, value_col] {
                if !is_row_identity(column) {
                    require_column(&physical, name, column)?;
                }
            }

            let rows = session.fetch_all(&build_select_columns(name, &[key_col, value_col], None))?;
            Ok(rows
                .into_iter()
                .map(|row| {
                    let mut fields = row.into_iter();
                    let key = fields.next().unwrap_or(Value::Null);
                    let value = fields.next().unwrap_or(Value::Null);
                    (key, value)
                })
                .collect())
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::database::LayerStore;
    use crate::error::Error;
    use crate::frame::{Column, Frame};
    use crate::sql::{ColumnSelection, Predicate};
    use crate::types::Value;
    use tempfile::{tempdir, TempDir};

    fn store() -> (TempDir, LayerStore) {
        let dir = tempdir().unwrap();
        let store = LayerStore::open(dir.path().join("query.sqlite")).unwrap();
        let frame = Frame::from_columns(vec![
            Column::int("c1", [10, 20, 30, 40, 50, 60]),
            Column::float("c2", [0.5, 1.5, 2.5, 3.5, 4.5, 5.5]),
            Column::text("c3", ["a", "b", "a", "b", "a", "b"]),
        ])
        .unwrap();
        store.create_from_frame("t", &frame).unwrap();
        (dir, store)
    }

    #[test]
    fn select_columns_with_limit() {
        let (_dir, store) = store();
        let out = store
            .select_columns("t", &ColumnSelection::list(["c3", "c1"]), Some(2))
            .unwrap();

        assert_eq!(out.column_names(), vec!["c3", "c1"]);
        assert_eq!(out.index(), &[1, 2]);
        assert_eq!(out.row(1).unwrap(), vec![Value::from("b"), Value::Int(20)]);
    }

    #[test]
    fn select_columns_range_and_exclude() {
        let (_dir, store) = store();
        let sel = ColumnSelection::range(Some("c1"), Some("c3")).excluding(["c2"]);

        let out = store.select_columns("t", &sel, None).unwrap();
        assert_eq!(out.column_names(), vec!["c1", "c3"]);
        assert_eq!(out.num_rows(), 6);
    }

    #[test]
    fn select_unknown_column_fails() {
        let (_dir, store) = store();
        let result = store.select_columns("t", &ColumnSelection::list(["zz"]), None);
        assert!(matches!(result, Err(Error::UnknownColumn { .. })));
    }

    #[test]
    fn row_identity_range_is_half_open() {
        let (_dir, store) = store();
        let out = store
            .select_rows("t", &ColumnSelection::all(), "rowid", &Predicate::range(2, 5))
            .unwrap();

        assert_eq!(out.index(), &[2, 3, 4]);
        assert_eq!(out.column_names(), vec!["c1", "c2", "c3"]);
    }

    #[test]
    fn open_row_identity_range_reaches_last_row() {
        let (_dir, store) = store();
        let open_end = Predicate::Range {
            start: Some(Value::Int(5)),
            end: None,
        };
        let out = store
            .select_rows("t", &ColumnSelection::list(["c1"]), "rowid", &open_end)
            .unwrap();
        assert_eq!(out.index(), &[5, 6]);

        let open_start = Predicate::Range {
            start: None,
            end: Some(Value::Int(3)),
        };
        let out = store
            .select_rows("t", &ColumnSelection::list(["c1"]), "rowid", &open_start)
            .unwrap();
        assert_eq!(out.index(), &[1, 2]);
    }

    #[test]
    fn key_column_leads_without_duplication() {
        let (_dir, store) = store();
        let out = store
            .select_rows(
                "t",
                &ColumnSelection::list(["c1", "c3"]),
                "c3",
                &Predicate::eq("a"),
            )
            .unwrap();

        assert_eq!(out.column_names(), vec!["c3", "c1"]);
        assert_eq!(out.index(), &[1, 3, 5]);
    }

    #[test]
    fn data_column_range_and_membership() {
        let (_dir, store) = store();
        let out = store
            .select_rows("t", &ColumnSelection::list(["c2"]), "c1", &Predicate::range(20, 40))
            .unwrap();
        assert_eq!(out.index(), &[2, 3]);

        let out = store
            .select_rows(
                "t",
                &ColumnSelection::list(["c2"]),
                "c1",
                &Predicate::any_of([10, 60]),
            )
            .unwrap();
        assert_eq!(out.index(), &[1, 6]);

        let out = store
            .select_rows("t", &ColumnSelection::all(), "c1", &Predicate::In(vec![]))
            .unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn open_range_on_empty_layer_is_empty() {
        let (_dir, store) = store();
        store
            .delete_rows("t", "rowid", &(1..=6).map(Value::Int).collect::<Vec<_>>())
            .unwrap();

        let out = store
            .select_rows(
                "t",
                &ColumnSelection::all(),
                "rowid",
                &Predicate::Range {
                    start: None,
                    end: None,
                },
            )
            .unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn select_pairs_follow_row_order() {
        let (_dir, store) = store();
        let pairs = store.select_pairs("t", "c1", "c3").unwrap();

        assert_eq!(pairs.len(), 6);
        assert_eq!(pairs[0], (Value::Int(10), Value::from("a")));
        assert_eq!(pairs[5], (Value::Int(60), Value::from("b")));

        let by_rowid = store.select_pairs("t", "rowid", "c1").unwrap();
        assert_eq!(by_rowid[2], (Value::Int(3), Value::Int(30)));
    }
}
