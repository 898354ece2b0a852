//! # Catalog Module
//!
//! The catalog is the `tables_info` table: one row per managed layer, keyed
//! by name, holding its tag, shape and description. [`Catalog`] is its only
//! writer.
//!
//! ```text
//! tables_info(name TEXT PRIMARY KEY COLLATE NOCASE, tag TEXT, shape TEXT, info TEXT)
//! ```
//!
//! SQLite resolves table names without regard to ASCII case, so the catalog
//! key uses `NOCASE` and every lookup by name goes through SQL. `Layer1` and
//! `layer1` are one layer; the entry keeps the spelling it was registered
//! with.
//!
//! ## Shape
//!
//! The shape is persisted as `"<rows>x<cols>"` text rather than counted on
//! demand, so reading layer metadata never scans the layer. Every operation
//! that changes a layer's row or column count must update it in the same
//! transaction.

use crate::config::{CATALOG_TABLE, SHAPE_SEPARATOR};
use crate::error::{Error, Result};
use crate::sql::Statement;
use crate::storage::Session;
use crate::types::Value;
use std::fmt;
use std::str::FromStr;

/// Denormalized (rows, columns) pair of a layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Shape {
    pub rows: usize,
    pub cols: usize,
}

impl Shape {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.rows, SHAPE_SEPARATOR, self.cols)
    }
}

impl FromStr for Shape {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (rows, cols) = s.trim().split_once(SHAPE_SEPARATOR).ok_or(())?;
        Ok(Shape {
            rows: rows.parse().map_err(|_| ())?,
            cols: cols.parse().map_err(|_| ())?,
        })
    }
}

impl From<(usize, usize)> for Shape {
    fn from((rows, cols): (usize, usize)) -> Self {
        Shape { rows, cols }
    }
}

/// One row of the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub name: String,
    pub tag: Option<String>,
    pub shape: Shape,
    pub info: Option<String>,
}

/// Catalog operations over an open session.
pub struct Catalog<'a> {
    session: &'a Session<'a>,
}

impl<'a> Catalog<'a> {
    pub fn new(session: &'a Session<'a>) -> Self {
        Self { session }
    }

    /// Creates the catalog table if it does not exist yet.
    pub fn ensure_catalog(&self) -> Result<()> {
        self.session.execute(&Statement::bare(format!(
            "CREATE TABLE IF NOT EXISTS {} \
             (name TEXT PRIMARY KEY COLLATE NOCASE, tag TEXT, shape TEXT, info TEXT)",
            CATALOG_TABLE
        )))?;
        Ok(())
    }

    /// Layer names in registration order, optionally limited to one tag.
    pub fn list_tables(&self, tag: Option<&str>) -> Result<Vec<String>> {
        let stmt = match tag {
            Some(tag) => Statement::new(
                format!(
                    "SELECT name FROM {} WHERE tag = ? ORDER BY rowid",
                    CATALOG_TABLE
                ),
                vec![Value::from(tag)],
            ),
            None => Statement::bare(format!("SELECT name FROM {} ORDER BY rowid", CATALOG_TABLE)),
        };

        Ok(self
            .session
            .fetch_all(&stmt)?
            .into_iter()
            .filter_map(|row| match row.into_iter().next() {
                Some(Value::Text(name)) => Some(name),
                _ => None,
            })
            .collect())
    }

    pub fn exists(&self, name: &str) -> Result<bool> {
        let stmt = Statement::new(
            format!("SELECT 1 FROM {} WHERE name = ?", CATALOG_TABLE),
            vec![Value::from(name)],
        );
        Ok(self.session.fetch_one(&stmt)?.is_some())
    }

    /// Fails with `UnknownTable` unless `name` is registered.
    pub fn require(&self, name: &str) -> Result<()> {
        if self.exists(name)? {
            Ok(())
        } else {
            Err(Error::unknown_table(name))
        }
    }

    pub fn register_table(&self, name: &str, shape: Shape) -> Result<()> {
        let stmt = Statement::new(
            format!("INSERT INTO {} (name, shape) VALUES (?, ?)", CATALOG_TABLE),
            vec![Value::from(name), Value::Text(shape.to_string())],
        );

        match self.session.execute(&stmt) {
            Ok(_) => Ok(()),
            Err(err) if err.is_constraint_violation() => Err(Error::DuplicateTable {
                table: name.to_string(),
            }),
            Err(err) => Err(err),
        }
    }

    pub fn update_shape(&self, name: &str, rows: usize, cols: usize) -> Result<()> {
        self.update_field(name, "shape", Value::Text(Shape::new(rows, cols).to_string()))
    }

    pub fn set_tag(&self, name: &str, tag: &str) -> Result<()> {
        self.update_field(name, "tag", Value::from(tag))
    }

    pub fn set_info(&self, name: &str, info: &str) -> Result<()> {
        self.update_field(name, "info", Value::from(info))
    }

    /// Moves an entry to a new key, keeping tag, shape and info.
    pub fn rename_entry(&self, name: &str, new_name: &str) -> Result<()> {
        self.update_field(name, "name", Value::from(new_name))
    }

    fn update_field(&self, name: &str, field: &'static str, value: Value) -> Result<()> {
        let stmt = Statement::new(
            format!("UPDATE {} SET {} = ? WHERE name = ?", CATALOG_TABLE, field),
            vec![value, Value::from(name)],
        );
        match self.session.execute(&stmt)? {
            0 => Err(Error::unknown_table(name)),
            _ => Ok(()),
        }
    }

    /// Removes an entry. Removing a missing entry is not an error.
    pub fn unregister_table(&self, name: &str) -> Result<()> {
        self.session.execute(&Statement::new(
            format!("DELETE FROM {} WHERE name = ?", CATALOG_TABLE),
            vec![Value::from(name)],
        ))?;
        Ok(())
    }

    /// Stored shape, or `(0, 0)` when the entry or its shape is missing.
    pub fn get_shape(&self, name: &str) -> Result<Shape> {
        match self.entry(name)? {
            Some(entry) => Ok(entry.shape),
            None => Ok(Shape::default()),
        }
    }

    pub fn get_tag(&self, name: &str) -> Result<Option<String>> {
        Ok(self.entry(name)?.and_then(|e| e.tag))
    }

    pub fn get_info(&self, name: &str) -> Result<Option<String>> {
        Ok(self.entry(name)?.and_then(|e| e.info))
    }

    pub fn entry(&self, name: &str) -> Result<Option<CatalogEntry>> {
        let stmt = Statement::new(
            format!(
                "SELECT name, tag, shape, info FROM {} WHERE name = ?",
                CATALOG_TABLE
            ),
            vec![Value::from(name)],
        );
        self.session
            .fetch_one(&stmt)?
            .map(parse_entry)
            .transpose()
    }

    /// Every entry in registration order, optionally limited to one tag.
    pub fn entries(&self, tag: Option<&str>) -> Result<Vec<CatalogEntry>> {
        let stmt = match tag {
            Some(tag) => Statement::new(
                format!(
                    "SELECT name, tag, shape, info FROM {} WHERE tag = ? ORDER BY rowid",
                    CATALOG_TABLE
                ),
                vec![Value::from(tag)],
            ),
            None => Statement::bare(format!(
                "SELECT name, tag, shape, info FROM {} ORDER BY rowid",
                CATALOG_TABLE
            )),
        };

        self.session
            .fetch_all(&stmt)?
            .into_iter()
            .map(parse_entry)
            .collect()
    }
}

fn text(value: Value) -> Option<String> {
    match value {
        Value::Text(s) => Some(s),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

fn parse_entry(row: Vec<Value>) -> Result<CatalogEntry> {
    let mut fields = row.into_iter().map(text);
    let name = fields.next().flatten().unwrap_or_default();
    let tag = fields.next().flatten();
    let shape_text = fields.next().flatten();
    let info = fields.next().flatten();

    let shape = match shape_text {
        None => Shape::default(),
        Some(s) if s.is_empty() => Shape::default(),
        Some(s) => s.parse().map_err(|_| Error::CorruptCatalog {
            table: name.clone(),
            shape: s.clone(),
        })?,
    };

    Ok(CatalogEntry {
        name,
        tag,
        shape,
        info,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StoreConfig;
    use crate::storage::Gateway;
    use tempfile::tempdir;

    fn with_catalog<T>(f: impl FnOnce(&Catalog<'_>) -> Result<T>) -> T {
        let dir = tempdir().unwrap();
        let gw = Gateway::new(StoreConfig::new(dir.path().join("catalog.sqlite")));
        gw.with_session(|s| {
            let catalog = Catalog::new(s);
            catalog.ensure_catalog()?;
            f(&catalog)
        })
        .unwrap()
    }

    #[test]
    fn names_match_without_regard_to_case() {
        with_catalog(|c| {
            c.register_table("Layer1", Shape::new(2, 1))?;

            assert!(c.exists("layer1")?);
            assert!(c.exists("LAYER1")?);
            assert_eq!(c.entry("layer1")?.map(|e| e.name), Some("Layer1".to_string()));

            let err = c.register_table("LAYER1", Shape::new(1, 1)).unwrap_err();
            assert!(matches!(err, Error::DuplicateTable { .. }));

            c.unregister_table("layer1")?;
            assert!(c.list_tables(None)?.is_empty());
            Ok(())
        });
    }

    #[test]
    fn shape_text_round_trip() {
        assert_eq!(Shape::new(10, 3).to_string(), "10x3");
        assert_eq!("11x3".parse::<Shape>(), Ok(Shape::new(11, 3)));
        assert!("11-3".parse::<Shape>().is_err());
        assert!("ax3".parse::<Shape>().is_err());
    }

    #[test]
    fn ensure_catalog_is_idempotent() {
        with_catalog(|c| {
            c.ensure_catalog()?;
            c.ensure_catalog()?;
            assert!(c.list_tables(None)?.is_empty());
            Ok(())
        });
    }

    #[test]
    fn register_then_list_in_order() {
        with_catalog(|c| {
            c.register_table("b", Shape::new(1, 1))?;
            c.register_table("a", Shape::new(2, 2))?;
            assert_eq!(c.list_tables(None)?, vec!["b", "a"]);
            assert!(c.exists("a")?);
            assert!(!c.exists("c")?);
            Ok(())
        });
    }

    #[test]
    fn duplicate_registration_fails() {
        with_catalog(|c| {
            c.register_table("a", Shape::new(1, 1))?;
            let err = c.register_table("a", Shape::new(1, 1)).unwrap_err();
            assert!(matches!(err, Error::DuplicateTable { ref table } if table == "a"));
            Ok(())
        });
    }

    #[test]
    fn tag_filter_is_exact() {
        with_catalog(|c| {
            c.register_table("a", Shape::default())?;
            c.register_table("b", Shape::default())?;
            c.set_tag("a", "raw")?;
            c.set_tag("b", "raw-data")?;

            assert_eq!(c.list_tables(Some("raw"))?, vec!["a"]);
            assert!(c.list_tables(Some("none"))?.is_empty());
            Ok(())
        });
    }

    #[test]
    fn updates_on_missing_entry_fail() {
        with_catalog(|c| {
            assert!(matches!(c.update_shape("x", 1, 1), Err(Error::UnknownTable { .. })));
            assert!(matches!(c.set_tag("x", "t"), Err(Error::UnknownTable { .. })));
            assert!(matches!(c.set_info("x", "i"), Err(Error::UnknownTable { .. })));
            Ok(())
        });
    }

    #[test]
    fn set_tag_leaves_other_fields_alone() {
        with_catalog(|c| {
            c.register_table("a", Shape::new(4, 2))?;
            c.set_info("a", "first")?;
            c.set_tag("a", "data")?;

            let entry = c.entry("a")?.unwrap();
            assert_eq!(entry.shape, Shape::new(4, 2));
            assert_eq!(entry.info.as_deref(), Some("first"));
            assert_eq!(entry.tag.as_deref(), Some("data"));
            Ok(())
        });
    }

    #[test]
    fn unregister_is_idempotent() {
        with_catalog(|c| {
            c.register_table("a", Shape::default())?;
            c.unregister_table("a")?;
            c.unregister_table("a")?;
            assert!(!c.exists("a")?);
            Ok(())
        });
    }

    #[test]
    fn shape_of_missing_entry_is_zero() {
        with_catalog(|c| {
            assert_eq!(c.get_shape("missing")?, Shape::new(0, 0));
            Ok(())
        });
    }

    #[test]
    fn malformed_shape_is_reported() {
        with_catalog(|c| {
            c.register_table("a", Shape::default())?;
            c.session.execute(&Statement::bare(
                "UPDATE tables_info SET shape = 'bogus' WHERE name = 'a'",
            ))?;
            assert!(matches!(c.get_shape("a"), Err(Error::CorruptCatalog { .. })));
            Ok(())
        });
    }

    #[test]
    fn rename_entry_moves_key() {
        with_catalog(|c| {
            c.register_table("a", Shape::new(3, 1))?;
            c.set_tag("a", "t")?;
            c.rename_entry("a", "b")?;

            assert!(!c.exists("a")?);
            let entry = c.entry("b")?.unwrap();
            assert_eq!(entry.shape, Shape::new(3, 1));
            assert_eq!(entry.tag.as_deref(), Some("t"));
            Ok(())
        });
    }
}
