//! # Row and Column Addressing
//!
//! Callers address columns with a [`ColumnSelection`] and rows with a
//! [`Predicate`].
//!
//! ## Column Forms
//!
//! | Form                      | Resolves to                                   |
//! |---------------------------|-----------------------------------------------|
//! | `ColumnSpec::All`         | every column, physical order                  |
//! | `ColumnSpec::List(names)` | the named columns, caller order               |
//! | `ColumnSpec::Range{s, e}` | physical columns from `s` through `e`         |
//!
//! Range endpoints are inclusive labels; a missing endpoint extends to the
//! first or last column. The `exclude` set is applied after the form is
//! resolved.

use crate::error::{Error, Result};
use crate::types::Value;

/// Which columns of a layer to read.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ColumnSpec {
    #[default]
    All,
    List(Vec<String>),
    Range {
        start: Option<String>,
        end: Option<String>,
    },
}

/// A column form plus names to drop from it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ColumnSelection {
    pub spec: ColumnSpec,
    pub exclude: Vec<String>,
}

impl ColumnSelection {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn list<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ColumnSpec::List(names.into_iter().map(Into::into).collect()).into()
    }

    pub fn range(start: Option<&str>, end: Option<&str>) -> Self {
        ColumnSpec::Range {
            start: start.map(str::to_string),
            end: end.map(str::to_string),
        }
        .into()
    }

    pub fn excluding<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude.extend(names.into_iter().map(Into::into));
        self
    }
}

impl From<ColumnSpec> for ColumnSelection {
    fn from(spec: ColumnSpec) -> Self {
        Self {
            spec,
            exclude: Vec::new(),
        }
    }
}

/// Row addressing mode.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Predicate {
    /// Rows whose key equals the value.
    Eq(Value),
    /// Rows whose key is one of the values.
    In(Vec<Value>),
    /// Rows whose key lies in `[start, end)`. A missing bound is open.
    Range {
        start: Option<Value>,
        end: Option<Value>,
    },
    /// Every row.
    #[default]
    All,
}

impl Predicate {
    pub fn eq(value: impl Into<Value>) -> Self {
        Predicate::Eq(value.into())
    }

    pub fn any_of<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Predicate::In(values.into_iter().map(Into::into).collect())
    }

    pub fn range(start: impl Into<Value>, end: impl Into<Value>) -> Self {
        Predicate::Range {
            start: Some(start.into()),
            end: Some(end.into()),
        }
    }
}

fn position(table: &str, physical: &[String], name: &str) -> Result<usize> {
    physical
        .iter()
        .position(|c| c == name)
        .ok_or_else(|| Error::unknown_column(table, name))
}

/// Resolves a selection against the layer's physical column order.
pub fn resolve_columns(
    selection: &ColumnSelection,
    table: &str,
    physical: &[String],
) -> Result<Vec<String>> {
    for name in &selection.exclude {
        position(table, physical, name)?;
    }

    let resolved: Vec<String> = match &selection.spec {
        ColumnSpec::All => physical.to_vec(),
        ColumnSpec::List(names) => {
            for name in names {
                position(table, physical, name)?;
            }
            names.clone()
        }
        ColumnSpec::Range { start, end } => {
            let from = match start {
                Some(name) => position(table, physical, name)?,
                None => 0,
            };
            let to = match end {
                Some(name) => position(table, physical, name)? + 1,
                None => physical.len(),
            };
            physical
                .get(from..to.max(from))
                .map(<[String]>::to_vec)
                .unwrap_or_default()
        }
    };

    Ok(resolved
        .into_iter()
        .filter(|c| !selection.exclude.contains(c))
        .collect())
}
