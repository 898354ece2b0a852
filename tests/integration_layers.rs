//! # Layer Store Integration Tests
//!
//! End-to-end behavior of `LayerStore` against real SQLite files:
//!
//! - Round trips of frames with 0, 1 and many rows
//! - Catalog consistency after create, drop and rename
//! - Shape bookkeeping for every mutating operation
//! - Row and column addressing
//! - Atomicity of failed operations
//! - Read-only access

use omilayers::{
    Column, ColumnSelection, Dtype, Error, Frame, LayerStore, Predicate, Shape, Value,
};
use rusqlite::Connection;
use std::path::PathBuf;
use tempfile::{tempdir, TempDir};

fn create_test_store() -> (LayerStore, TempDir) {
    let dir = tempdir().unwrap();
    let store = LayerStore::open(dir.path().join("layers.sqlite")).unwrap();
    (store, dir)
}

fn store_path(dir: &TempDir) -> PathBuf {
    dir.path().join("layers.sqlite")
}

fn mixed_frame(rows: usize) -> Frame {
    Frame::from_columns(vec![
        Column::int("id", (0..rows as i64).map(|i| i * 10)),
        Column::float("score", (0..rows).map(|i| i as f64 + 0.25)),
        Column::text("label", (0..rows).map(|i| format!("row-{}", i))),
    ])
    .unwrap()
}

fn layer1() -> Frame {
    Frame::from_columns(vec![
        Column::int("c1", 1..=10),
        Column::int("c2", 101..=110),
        Column::int("c3", 201..=210),
    ])
    .unwrap()
}

fn assert_catalog_consistent(store: &LayerStore, name: &str) {
    assert_eq!(
        store.exists(name).unwrap(),
        store.list_tables(None).unwrap().iter().any(|t| t == name),
        "exists({}) SHOULD agree with list_tables()",
        name
    );
}

mod round_trip {
    use super::*;

    #[test]
    fn frames_with_zero_one_and_many_rows_round_trip() {
        let (store, _dir) = create_test_store();

        for rows in [0usize, 1, 250] {
            let name = format!("mixed_{}", rows);
            let frame = mixed_frame(rows);

            store.create_from_frame(&name, &frame).unwrap();
            let loaded = store
                .select_columns(&name, &ColumnSelection::all(), None)
                .unwrap();

            assert!(loaded.values_eq(&frame), "{} rows SHOULD round-trip", rows);
            assert_eq!(store.get_shape(&name).unwrap(), Shape::new(rows, 3));
        }
    }

    #[test]
    fn loaded_frames_are_indexed_by_row_identity() {
        let (store, _dir) = create_test_store();
        store.create_from_frame("layer1", &layer1()).unwrap();

        let loaded = store
            .select_columns("layer1", &ColumnSelection::all(), None)
            .unwrap();

        assert_eq!(loaded.index(), (1..=10).collect::<Vec<i64>>().as_slice());
        assert_eq!(loaded.dtypes(), vec![Dtype::Int64; 3]);
    }

    #[test]
    fn null_bool_and_blob_values_survive() {
        let (store, _dir) = create_test_store();
        let frame = Frame::from_columns(vec![
            Column::new("maybe", vec![Value::Int(1), Value::Null]),
            Column::bool("flag", [true, false]),
            Column::new("raw", vec![Value::Blob(vec![1, 2]), Value::Blob(vec![])]),
        ])
        .unwrap();

        store.create_from_frame("t", &frame).unwrap();
        let loaded = store.select_columns("t", &ColumnSelection::all(), None).unwrap();

        assert_eq!(loaded.column("maybe").unwrap().values(), &[Value::Int(1), Value::Null]);
        assert_eq!(
            loaded.column("flag").unwrap().values(),
            &[Value::Int(1), Value::Int(0)],
            "bools SHOULD be stored as 0/1 integers"
        );
        assert_eq!(
            loaded.column("raw").unwrap().values(),
            &[Value::Blob(vec![1, 2]), Value::Blob(vec![])]
        );
    }
}

mod catalog {
    use super::*;

    #[test]
    fn exists_tracks_create_drop_and_rename() {
        let (store, _dir) = create_test_store();

        store.create_from_frame("a", &layer1()).unwrap();
        assert_catalog_consistent(&store, "a");
        assert!(store.exists("a").unwrap());

        store.rename("a", "b").unwrap();
        assert_catalog_consistent(&store, "a");
        assert_catalog_consistent(&store, "b");
        assert!(!store.exists("a").unwrap());

        store.drop_table("b").unwrap();
        assert_catalog_consistent(&store, "b");
        assert!(store.list_tables(None).unwrap().is_empty());
    }

    #[test]
    fn catalog_and_tables_agree_in_sqlite_master() {
        let (store, dir) = create_test_store();
        store.create_from_frame("a", &layer1()).unwrap();
        store.create_from_frame("b", &layer1()).unwrap();
        store.drop_table("a").unwrap();

        let conn = Connection::open(store_path(&dir)).unwrap();
        let mut stmt = conn
            .prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
            .unwrap();
        let tables: Vec<String> = stmt
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(tables, vec!["b", "tables_info"]);
        assert_eq!(store.list_tables(None).unwrap(), vec!["b"]);
    }

    #[test]
    fn listing_keeps_registration_order_and_filters_by_tag() {
        let (store, _dir) = create_test_store();
        for name in ["zeta", "alpha", "mid"] {
            store.create_from_frame(name, &layer1()).unwrap();
        }
        store.set_tag("zeta", "raw").unwrap();
        store.set_tag("mid", "raw").unwrap();

        assert_eq!(store.list_tables(None).unwrap(), vec!["zeta", "alpha", "mid"]);
        assert_eq!(store.list_tables(Some("raw")).unwrap(), vec!["zeta", "mid"]);
        assert!(store.list_tables(Some("missing")).unwrap().is_empty());
    }

    #[test]
    fn tag_and_info_updates_touch_only_their_field() {
        let (store, _dir) = create_test_store();
        store.create_from_frame("layer1", &layer1()).unwrap();

        store.set_info("layer1", "This is the first layer.").unwrap();
        store.set_tag("layer1", "data").unwrap();

        let entry = store.entry("layer1").unwrap();
        assert_eq!(entry.info.as_deref(), Some("This is the first layer."));
        assert_eq!(entry.tag.as_deref(), Some("data"));
        assert_eq!(entry.shape, Shape::new(10, 3));

        store.set_info("layer1", "changed").unwrap();
        assert_eq!(store.get_tag("layer1").unwrap().as_deref(), Some("data"));
    }

    #[test]
    fn drop_is_idempotent() {
        let (store, _dir) = create_test_store();
        store.create_from_frame("layer1", &layer1()).unwrap();

        store.drop_table("layer1").unwrap();
        store.drop_table("layer1").unwrap();
        store.drop_table("never_existed").unwrap();

        assert!(!store.exists("layer1").unwrap());
    }

    #[test]
    fn dropping_by_case_variant_removes_catalog_entry() {
        let (store, dir) = create_test_store();
        store.create_from_frame("layer1", &layer1()).unwrap();

        store.drop_table("LAYER1").unwrap();

        assert!(!store.exists("layer1").unwrap());
        assert_catalog_consistent(&store, "layer1");
        let conn = Connection::open(store_path(&dir)).unwrap();
        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name <> 'tables_info'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn creating_by_case_variant_keeps_one_entry_per_table() {
        let (store, _dir) = create_test_store();
        store.create_from_frame("layer1", &layer1()).unwrap();

        let other = Frame::from_columns(vec![Column::text("z", ["a", "b"])]).unwrap();
        store.create_from_frame("Layer1", &other).unwrap();

        assert_eq!(store.list_tables(None).unwrap(), vec!["Layer1"]);
        assert!(store.exists("layer1").unwrap());
        assert_eq!(store.column_names("layer1").unwrap(), vec!["z"]);
        assert_eq!(store.get_shape("layer1").unwrap(), Shape::new(2, 1));
    }

    #[test]
    fn reopening_sees_previous_state() {
        let (store, dir) = create_test_store();
        store.create_from_frame("layer1", &layer1()).unwrap();
        store.set_tag("layer1", "kept").unwrap();
        drop(store);

        let reopened = LayerStore::open(store_path(&dir)).unwrap();
        assert_eq!(reopened.get_tag("layer1").unwrap().as_deref(), Some("kept"));
        assert_eq!(reopened.get_shape("layer1").unwrap(), Shape::new(10, 3));
    }
}

mod shape {
    use super::*;

    #[test]
    fn insert_adds_rows_and_keeps_columns() {
        let (store, _dir) = create_test_store();
        let first = mixed_frame(7);
        let second = mixed_frame(5);

        store.create_from_frame("t", &first).unwrap();
        store.insert("t", &second, false).unwrap();

        assert_eq!(store.get_shape("t").unwrap(), Shape::new(12, 3));
    }

    #[test]
    fn column_and_row_changes_keep_shape_truthful() {
        let (store, _dir) = create_test_store();
        store.create_from_frame("layer1", &layer1()).unwrap();

        let extra: Vec<Value> = (1..=10).map(|i| Value::Float(i as f64 / 10.0)).collect();
        store.add_column("layer1", "c4", &extra, "rowid", None).unwrap();
        assert_eq!(store.get_shape("layer1").unwrap(), Shape::new(10, 4));

        store.drop_column("layer1", "c2").unwrap();
        assert_eq!(store.get_shape("layer1").unwrap(), Shape::new(10, 3));

        let deleted = store
            .delete_rows("layer1", "c1", &[Value::Int(1), Value::Int(2)])
            .unwrap();
        assert_eq!(deleted, 2);
        assert_eq!(store.get_shape("layer1").unwrap(), Shape::new(8, 3));

        let counted = store
            .select_columns("layer1", &ColumnSelection::all(), None)
            .unwrap();
        assert_eq!(counted.num_rows(), 8);
        assert_eq!(counted.num_columns(), 3);
    }
}

mod addressing {
    use super::*;

    #[test]
    fn row_identity_range_is_half_open() {
        let (store, _dir) = create_test_store();
        store.create_from_frame("layer1", &layer1()).unwrap();

        let rows = store
            .select_rows("layer1", &ColumnSelection::all(), "rowid", &Predicate::range(2, 5))
            .unwrap();

        assert_eq!(rows.index(), &[2, 3, 4]);
        assert_eq!(
            rows.column("c1").unwrap().values(),
            &[Value::Int(2), Value::Int(3), Value::Int(4)]
        );
    }

    #[test]
    fn reversed_and_extreme_ranges_select_nothing() {
        let (store, _dir) = create_test_store();
        store.create_from_frame("layer1", &layer1()).unwrap();

        for predicate in [
            Predicate::range(5, 2),
            Predicate::range(0, i64::MIN),
            Predicate::range(i64::MIN, i64::MIN),
        ] {
            let rows = store
                .select_rows("layer1", &ColumnSelection::all(), "rowid", &predicate)
                .unwrap();
            assert!(rows.is_empty(), "{:?} SHOULD select no rows", predicate);
        }

        let to_end = store
            .select_rows(
                "layer1",
                &ColumnSelection::all(),
                "rowid",
                &Predicate::Range {
                    start: Some(Value::Int(i64::MIN)),
                    end: None,
                },
            )
            .unwrap();
        assert_eq!(to_end.num_rows(), 10);
    }

    #[test]
    fn select_by_value_leads_with_key_column() {
        let (store, _dir) = create_test_store();
        store.create_from_frame("layer1", &layer1()).unwrap();

        let rows = store
            .select_rows(
                "layer1",
                &ColumnSelection::list(["c1", "c2"]),
                "c3",
                &Predicate::eq(203),
            )
            .unwrap();

        assert_eq!(rows.column_names(), vec!["c3", "c1", "c2"]);
        assert_eq!(
            rows.row(0).unwrap(),
            vec![Value::Int(203), Value::Int(3), Value::Int(103)]
        );
    }

    #[test]
    fn values_are_bound_not_interpolated() {
        let (store, _dir) = create_test_store();
        let frame = Frame::from_columns(vec![Column::text("name", ["o'brien", "x"])]).unwrap();
        store.create_from_frame("people", &frame).unwrap();

        let rows = store
            .select_rows(
                "people",
                &ColumnSelection::all(),
                "name",
                &Predicate::eq("o'brien"),
            )
            .unwrap();
        assert_eq!(rows.num_rows(), 1);

        let none = store
            .select_rows(
                "people",
                &ColumnSelection::all(),
                "name",
                &Predicate::eq("x' OR '1'='1"),
            )
            .unwrap();
        assert!(none.is_empty());
    }

    #[test]
    fn awkward_identifiers_are_quoted() {
        let (store, _dir) = create_test_store();
        let frame = Frame::from_columns(vec![
            Column::int("my col", [1]),
            Column::int("say \"hi\"", [2]),
        ])
        .unwrap();

        store.create_from_frame("odd \"name\"", &frame).unwrap();

        assert_eq!(
            store.column_names("odd \"name\"").unwrap(),
            vec!["my col", "say \"hi\""]
        );
    }

    #[test]
    fn select_pairs_projects_key_value() {
        let (store, _dir) = create_test_store();
        store.create_from_frame("layer1", &layer1()).unwrap();

        let pairs = store.select_pairs("layer1", "c1", "c2").unwrap();
        let keys: i64 = pairs.iter().filter_map(|(k, _)| k.as_i64()).sum();
        let values: i64 = pairs.iter().filter_map(|(_, v)| v.as_i64()).sum();

        assert_eq!(keys, 55);
        assert_eq!(values, 1055);
    }
}

mod unordered_insert {
    use super::*;

    #[test]
    fn unordered_insert_equals_ordered_insert() {
        let (store, _dir) = create_test_store();
        store.create_from_frame("a", &layer1()).unwrap();
        store.create_from_frame("b", &layer1()).unwrap();

        let ordered = Frame::from_columns(vec![
            Column::int("c1", [1000]),
            Column::int("c2", [400]),
            Column::int("c3", [300]),
        ])
        .unwrap();
        let unordered = Frame::from_columns(vec![
            Column::int("c2", [400]),
            Column::int("c3", [300]),
            Column::int("c1", [1000]),
        ])
        .unwrap();

        store.insert("a", &ordered, true).unwrap();
        store.insert("b", &unordered, false).unwrap();

        let a = store.select_columns("a", &ColumnSelection::all(), None).unwrap();
        let b = store.select_columns("b", &ColumnSelection::all(), None).unwrap();
        assert!(a.values_eq(&b));
    }

    #[test]
    fn layer1_scenario() {
        let (store, _dir) = create_test_store();
        store.create_from_frame("layer1", &layer1()).unwrap();
        assert_eq!(store.get_shape("layer1").unwrap(), Shape::new(10, 3));

        let row = Frame::from_columns(vec![
            Column::int("c2", [400]),
            Column::int("c3", [300]),
            Column::int("c1", [1000]),
        ])
        .unwrap();
        store.insert("layer1", &row, false).unwrap();

        let loaded = store
            .select_columns("layer1", &ColumnSelection::all(), None)
            .unwrap();
        assert_eq!(
            loaded.last_row().unwrap(),
            vec![Value::Int(1000), Value::Int(400), Value::Int(300)]
        );
        assert_eq!(store.get_shape("layer1").unwrap(), Shape::new(11, 3));
    }
}

mod atomicity {
    use super::*;

    #[test]
    fn failed_create_leaves_nothing_behind() {
        let (store, dir) = create_test_store();
        let bad = Frame::from_columns(vec![Column::int("c1", [1]), Column::int("oid", [2])]).unwrap();

        let err = store.create_from_frame("broken", &bad).unwrap_err();
        assert!(matches!(err, Error::TableCreation { ref table, .. } if table == "broken"));

        assert!(!store.exists("broken").unwrap());
        let conn = Connection::open(store_path(&dir)).unwrap();
        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE name = 'broken'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 0, "no data table SHOULD remain after a failed create");
    }

    #[test]
    fn failed_replace_keeps_previous_layer() {
        let (store, _dir) = create_test_store();
        store.create_from_frame("layer1", &layer1()).unwrap();
        store.set_info("layer1", "original").unwrap();

        let bad = Frame::from_columns(vec![Column::int("rowid", [1])]).unwrap();
        assert!(store.create_from_frame("layer1", &bad).is_err());

        assert_eq!(store.get_shape("layer1").unwrap(), Shape::new(10, 3));
        assert_eq!(store.get_info("layer1").unwrap().as_deref(), Some("original"));
        assert_eq!(store.column_names("layer1").unwrap(), vec!["c1", "c2", "c3"]);
    }

    #[test]
    fn create_rejected_by_sqlite_rolls_back_catalog_row() {
        let (store, dir) = create_test_store();
        store.create_from_frame("kept", &layer1()).unwrap();

        let clashing = Frame::from_columns(vec![Column::int("c1", [1]), Column::int("C1", [2])]).unwrap();
        let err = store.create_from_frame("broken", &clashing).unwrap_err();
        assert!(matches!(err, Error::TableCreation { ref table, .. } if table == "broken"));

        assert!(!store.exists("broken").unwrap());
        assert_eq!(store.list_tables(None).unwrap(), vec!["kept"]);
        let conn = Connection::open(store_path(&dir)).unwrap();
        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE name = 'broken'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 0, "the data table SHOULD be rolled back with the catalog row");
    }

    #[test]
    fn replace_rejected_by_sqlite_keeps_previous_layer() {
        let (store, _dir) = create_test_store();
        store.create_from_frame("layer1", &layer1()).unwrap();

        let clashing = Frame::from_columns(vec![Column::int("c1", [1]), Column::int("C1", [2])]).unwrap();
        assert!(store.create_from_frame("layer1", &clashing).is_err());

        assert_eq!(store.get_shape("layer1").unwrap(), Shape::new(10, 3));
        assert_eq!(
            store
                .select_columns("layer1", &ColumnSelection::all(), None)
                .unwrap()
                .num_rows(),
            10
        );
    }

    #[test]
    fn rejected_insert_changes_nothing() {
        let (store, _dir) = create_test_store();
        store.create_from_frame("layer1", &layer1()).unwrap();

        let wrong = Frame::from_columns(vec![Column::int("c1", [1]), Column::int("c9", [2])]).unwrap();
        assert!(matches!(
            store.insert("layer1", &wrong, false),
            Err(Error::ColumnMismatch { .. })
        ));
        assert_eq!(store.get_shape("layer1").unwrap(), Shape::new(10, 3));
    }
}

mod read_only {
    use super::*;

    #[test]
    fn read_only_store_reads_but_rejects_writes() {
        let (store, dir) = create_test_store();
        store.create_from_frame("layer1", &layer1()).unwrap();
        drop(store);

        let reader = LayerStore::open_read_only(store_path(&dir)).unwrap();

        assert_eq!(reader.list_tables(None).unwrap(), vec!["layer1"]);
        assert_eq!(
            reader
                .select_columns("layer1", &ColumnSelection::all(), Some(3))
                .unwrap()
                .num_rows(),
            3
        );

        assert!(matches!(
            reader.create_from_frame("x", &layer1()),
            Err(Error::ReadOnly { .. })
        ));
        assert!(matches!(
            reader.insert("layer1", &layer1(), false),
            Err(Error::ReadOnly { .. })
        ));
        assert!(matches!(reader.drop_table("layer1"), Err(Error::ReadOnly { .. })));
        assert!(matches!(
            reader.delete_rows("layer1", "c1", &[Value::Int(1)]),
            Err(Error::ReadOnly { .. })
        ));
        assert!(reader.exists("layer1").unwrap());
    }

    #[test]
    fn read_only_open_does_not_create_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.sqlite");

        assert!(LayerStore::open_read_only(&path).is_err());
        assert!(!path.exists());
    }
}

mod walkthrough {
    use super::*;

    #[test]
    fn full_layer_lifecycle() {
        let (store, _dir) = create_test_store();

        let first = Frame::from_columns(vec![
            Column::int("col1", 1..=10),
            Column::int("col2", 11..=20),
            Column::int("col3", 21..=30),
        ])
        .unwrap();
        store.create_from_frame("first_layer", &first).unwrap();
        assert_eq!(store.column_names("first_layer").unwrap(), vec!["col1", "col2", "col3"]);

        store.set_info("first_layer", "This is the first layer.").unwrap();
        store.set_tag("first_layer", "data").unwrap();

        let replacement = Frame::from_columns(vec![
            Column::int("col1", 101..=110),
            Column::int("col2", 111..=120),
            Column::int("col3", 121..=130),
            Column::int("col4", 131..=140),
        ])
        .unwrap();
        store.create_from_frame("first_layer", &replacement).unwrap();
        assert_eq!(
            store.get_info("first_layer").unwrap().as_deref(),
            Some("This is the first layer.")
        );
        assert_eq!(store.get_tag("first_layer").unwrap().as_deref(), Some("data"));

        for (c1, c2, c3, c4) in [(1000, 400, 300, 400), (10000, 4000, 3000, 4000)] {
            let row = Frame::from_columns(vec![
                Column::int("col2", [c2]),
                Column::int("col3", [c3]),
                Column::int("col1", [c1]),
                Column::int("col4", [c4]),
            ])
            .unwrap();
            store.insert("first_layer", &row, false).unwrap();
        }

        let hit = store
            .select_rows(
                "first_layer",
                &ColumnSelection::list(["col1", "col2"]),
                "col3",
                &Predicate::eq(3000),
            )
            .unwrap();
        assert_eq!(
            hit.row(0).unwrap(),
            vec![Value::Int(3000), Value::Int(10000), Value::Int(4000)]
        );

        store.rename_column("first_layer", "col4", "col5").unwrap();
        store.drop_column("first_layer", "col5").unwrap();
        assert_eq!(store.column_names("first_layer").unwrap(), vec!["col1", "col2", "col3"]);

        store
            .delete_rows("first_layer", "col3", &[Value::Int(3000)])
            .unwrap();
        let col3 = store
            .select_columns("first_layer", &ColumnSelection::list(["col3"]), None)
            .unwrap();
        assert!(!col3.column("col3").unwrap().values().contains(&Value::Int(3000)));

        let pairs = store.select_pairs("first_layer", "col1", "col2").unwrap();
        let keys: i64 = pairs.iter().filter_map(|(k, _)| k.as_i64()).sum();
        let values: i64 = pairs.iter().filter_map(|(_, v)| v.as_i64()).sum();
        assert_eq!(keys, 2055);
        assert_eq!(values, 1555);

        let renumbered: Vec<Value> = (1..=11).map(Value::Int).collect();
        store.update_column("first_layer", "col1", &renumbered).unwrap();
        let col1 = store
            .select_columns("first_layer", &ColumnSelection::list(["col1"]), None)
            .unwrap();
        assert_eq!(col1.column("col1").unwrap().values(), renumbered.as_slice());
        assert_eq!(store.get_shape("first_layer").unwrap(), Shape::new(11, 3));
    }
}
