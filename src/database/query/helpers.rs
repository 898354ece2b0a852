//! Shared pieces of the read path: turning fetched rows into a frame and
//! resolving open row-identity ranges.

use crate::database::PhysicalColumn;
use crate::error::Result;
use crate::frame::{Column, Frame};
use crate::sql::builder::build_rowid_bounds;
use crate::sql::Predicate;
use crate::storage::Session;
use crate::types::{Dtype, Value};

/// Builds a frame from rows fetched as `[rowid, columns...]`.
///
/// The leading row identity becomes the frame index. Column dtypes follow
/// the declared store types of `physical`.
pub(super) fn assemble_frame(
    physical: &[PhysicalColumn],
    columns: &[String],
    rows: Vec<Vec<Value>>,
) -> Result<Frame> {
    let mut index = Vec::with_capacity(rows.len());
    let mut data: Vec<Vec<Value>> = vec![Vec::with_capacity(rows.len()); columns.len()];

    for row in rows {
        let mut fields = row.into_iter();
        index.push(fields.next().and_then(|v| v.as_i64()).unwrap_or_default());
        for (slot, value) in data.iter_mut().zip(fields) {
            slot.push(value);
        }
    }

    let columns = columns
        .iter()
        .zip(data)
        .map(|(name, values)| {
            let dtype = physical
                .iter()
                .find(|c| &c.name == name)
                .map_or(Dtype::Int64, |c| Dtype::from_declared(&c.declared));
            Column::with_dtype(name.as_str(), dtype, values)
        })
        .collect();

    Frame::from_columns(columns)?.with_index(index)
}

/// Fills missing bounds of a row-identity range from the layer's current
/// minimum and maximum row identity.
///
/// The upper bound becomes `MAX(rowid) + 1` so the half-open range still
/// includes the last row. An empty layer resolves to a predicate that
/// matches nothing.
pub(super) fn resolve_identity_range(
    session: &Session<'_>,
    table: &str,
    predicate: &Predicate,
) -> Result<Predicate> {
    let (start, end) = match predicate {
        Predicate::Range { start, end } if start.is_none() || end.is_none() => (start, end),
        other => return Ok(other.clone()),
    };

    let bounds = session.fetch_one(&build_rowid_bounds(table))?.unwrap_or_default();
    let min = bounds.first().and_then(Value::as_i64);
    let max = bounds.get(1).and_then(Value::as_i64);

    let (min, max) = match (min, max) {
        (Some(min), Some(max)) => (min, max),
        _ => return Ok(Predicate::In(Vec::new())),
    };

    // With max at i64::MAX there is no exclusive end; the end stays open.
    let end = match end {
        Some(end) => Some(end.clone()),
        None => max.checked_add(1).map(Value::Int),
    };
    Ok(Predicate::Range {
        start: Some(start.clone().unwrap_or(Value::Int(min))),
        end,
    })
}
