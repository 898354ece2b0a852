//! # ASCII Table Formatter
//!
//! Renders frames and catalog listings as ASCII tables.
//!
//! ## Output Format
//!
//! ```text
//! +-------+----+-----+
//! | rowid | c1 | c2  |
//! +-------+----+-----+
//! | 1     | 1  | 101 |
//! | 2     | 2  | 102 |
//! +-------+----+-----+
//! ```
//!
//! ## Column Width Calculation
//!
//! Column widths are the maximum of the header length and the longest value
//! in that column, at least 1 and at most 50 characters. Longer cells are
//! truncated with "...".
//!
//! ## Value Formatting
//!
//! - NULL: displayed as "NULL"
//! - Floats: trailing zeros trimmed
//! - Blobs: hex with a 16-byte preview

use crate::frame::Frame;
use crate::types::Value;

const MAX_COLUMN_WIDTH: usize = 50;
const BLOB_PREVIEW_BYTES: usize = 16;
const ELLIPSIS: &str = "...";

/// Text grid with fixed per-column widths.
pub struct TableFormatter {
    headers: Vec<String>,
    widths: Vec<usize>,
    cells: Vec<Vec<String>>,
}

impl TableFormatter {
    /// Table of a frame with its row index as the leading `rowid` column.
    pub fn from_frame(frame: &Frame) -> Self {
        let headers = std::iter::once("rowid".to_string())
            .chain(frame.column_names())
            .collect();
        let cells = frame
            .index()
            .iter()
            .zip(frame.records())
            .map(|(rowid, record)| {
                std::iter::once(rowid.to_string())
                    .chain(record.iter().map(format_value))
                    .collect()
            })
            .collect();
        Self::from_cells(headers, cells)
    }

    /// Table of pre-formatted text cells.
    pub fn from_cells(headers: Vec<String>, cells: Vec<Vec<String>>) -> Self {
        let widths = (0..headers.len())
            .map(|col| {
                cells
                    .iter()
                    .filter_map(|row| row.get(col))
                    .chain(std::iter::once(&headers[col]))
                    .map(|cell| cell.chars().count())
                    .max()
                    .unwrap_or(0)
                    .clamp(1, MAX_COLUMN_WIDTH)
            })
            .collect();

        Self {
            headers,
            widths,
            cells,
        }
    }

    pub fn render(&self) -> String {
        let border = self.border();
        let body = self.cells.iter().map(|row| self.line(row));

        let mut lines = vec![border.clone(), self.line(&self.headers), border.clone()];
        lines.extend(body);
        lines.push(border);

        let mut output = lines.join("\n");
        output.push('\n');
        output
    }

    fn border(&self) -> String {
        let segments: Vec<String> = self.widths.iter().map(|w| "-".repeat(w + 2)).collect();
        format!("+{}+", segments.join("+"))
    }

    fn line(&self, row: &[String]) -> String {
        let padded: Vec<String> = self
            .widths
            .iter()
            .enumerate()
            .map(|(col, &width)| {
                let cell = row.get(col).map(String::as_str).unwrap_or("");
                format!(" {:<width$} ", truncate(cell, width), width = width)
            })
            .collect();
        format!("|{}|", padded.join("|"))
    }
}

pub fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Int(i) => i.to_string(),
        Value::Float(f) => format_float(*f),
        Value::Text(s) => s.clone(),
        Value::Blob(b) => format_blob(b),
    }
}

fn format_float(f: f64) -> String {
    if !f.is_finite() {
        return f.to_string();
    }
    format!("{:.6}", f)
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

fn format_blob(bytes: &[u8]) -> String {
    let preview: String = bytes
        .iter()
        .take(BLOB_PREVIEW_BYTES)
        .map(|b| format!("{:02X}", b))
        .collect();
    if bytes.len() <= BLOB_PREVIEW_BYTES {
        format!("x'{}'", preview)
    } else {
        format!("x'{}'... ({} bytes)", preview, bytes.len())
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    if width <= ELLIPSIS.len() {
        return text.chars().take(width).collect();
    }
    let kept: String = text.chars().take(width - ELLIPSIS.len()).collect();
    kept + ELLIPSIS
}
