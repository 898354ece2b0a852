//! # In-Memory Frames
//!
//! `Frame` is the tabular value a layer is created from and that selections
//! return: an ordered list of named, typed columns of equal length plus an
//! integer row index.
//!
//! Frames built by callers get the positional index `0..n`. Frames returned
//! by the store carry the layer's row identities as their index, so callers
//! can tell which stored rows a selection matched.
//!
//! ## Boundary
//!
//! The store only relies on:
//!
//! - ordered column names and dtypes
//! - row count
//! - row-major record extraction (`records`)
//! - index assignment on construction (`with_index`)
//!
//! ## Usage
//!
//! ```ignore
//! use omilayers::frame::{Column, Frame};
//!
//! let frame = Frame::from_columns(vec![
//!     Column::int("c1", 1..=10),
//!     Column::text("label", (1..=10).map(|i| format!("row{}", i))),
//! ])?;
//! assert_eq!(frame.num_rows(), 10);
//! ```

mod column;

pub use column::Column;

use crate::error::{Error, Result};
use crate::types::{Dtype, Value};
use std::collections::HashSet;

/// Ordered collection of equal-length columns with a row index.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Frame {
    columns: Vec<Column>,
    index: Vec<i64>,
}

impl Frame {
    /// Builds a frame from columns, assigning the positional index `0..n`.
    ///
    /// Fails if column names repeat or column lengths differ.
    pub fn from_columns(columns: Vec<Column>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(columns.len());
        for col in &columns {
            if !seen.insert(col.name()) {
                return Err(Error::InvalidFrame(format!(
                    "duplicate column '{}'",
                    col.name()
                )));
            }
        }

        let rows = columns.first().map_or(0, Column::len);
        if let Some(col) = columns.iter().find(|c| c.len() != rows) {
            return Err(Error::InvalidFrame(format!(
                "column '{}' has {} values, expected {}",
                col.name(),
                col.len(),
                rows
            )));
        }

        Ok(Self {
            columns,
            index: (0..rows as i64).collect(),
        })
    }

    /// Builds a frame from row-major records; dtypes are inferred per column.
    pub fn from_rows<S: AsRef<str>>(names: &[S], rows: Vec<Vec<Value>>) -> Result<Self> {
        let mut data: Vec<Vec<Value>> = vec![Vec::with_capacity(rows.len()); names.len()];

        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != names.len() {
                return Err(Error::InvalidFrame(format!(
                    "row {} has {} values, expected {}",
                    i,
                    row.len(),
                    names.len()
                )));
            }
            for (slot, value) in data.iter_mut().zip(row) {
                slot.push(value);
            }
        }

        let columns = names
            .iter()
            .zip(data)
            .map(|(name, values)| Column::new(name.as_ref(), values))
            .collect();
        Self::from_columns(columns)
    }

    /// Replaces the row index. The index must have one entry per row.
    pub fn with_index(mut self, index: Vec<i64>) -> Result<Self> {
        if !self.columns.is_empty() && index.len() != self.num_rows() {
            return Err(Error::InvalidFrame(format!(
                "index has {} entries, frame has {} rows",
                index.len(),
                self.num_rows()
            )));
        }
        self.index = index;
        Ok(self)
    }

    pub fn num_rows(&self) -> usize {
        self.index.len()
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name() == name)
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name().to_string()).collect()
    }

    pub fn dtypes(&self) -> Vec<Dtype> {
        self.columns.iter().map(Column::dtype).collect()
    }

    pub fn index(&self) -> &[i64] {
        &self.index
    }

    /// Values of one row, in column order.
    pub fn row(&self, row: usize) -> Option<Vec<Value>> {
        if row >= self.num_rows() {
            return None;
        }
        Some(
            self.columns
                .iter()
                .map(|c| c.values()[row].clone())
                .collect(),
        )
    }

    pub fn last_row(&self) -> Option<Vec<Value>> {
        self.num_rows().checked_sub(1).and_then(|i| self.row(i))
    }

    /// Row-major records in row order.
    pub fn records(&self) -> impl Iterator<Item = Vec<Value>> + '_ {
        (0..self.num_rows()).map(move |i| {
            self.columns
                .iter()
                .map(|c| c.values()[i].clone())
                .collect()
        })
    }

    /// Copy of the frame with its columns arranged in `order`.
    ///
    /// Returns `None` unless `order` names exactly the frame's columns.
    pub fn reordered<S: AsRef<str>>(&self, order: &[S]) -> Option<Frame> {
        if order.len() != self.columns.len() {
            return None;
        }

        let columns = order
            .iter()
            .map(|name| self.column(name.as_ref()).cloned())
            .collect::<Option<Vec<_>>>()?;

        Some(Frame {
            columns,
            index: self.index.clone(),
        })
    }

    /// Compares column names and values, ignoring dtypes and the index.
    pub fn values_eq(&self, other: &Frame) -> bool {
        self.num_rows() == other.num_rows()
            && self.columns.len() == other.columns.len()
            && self
                .columns
                .iter()
                .zip(&other.columns)
                .all(|(a, b)| a.name() == b.name() && a.values() == b.values())
    }
}
