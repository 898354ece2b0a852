//! # Query Builder
//!
//! Pure functions that turn a table name, a column list and an optional
//! predicate into a [`Statement`]: SQL text plus a flat parameter list.
//!
//! ## Binding Rules
//!
//! - Identifiers are double-quoted with embedded quotes doubled; the row
//!   identity is always emitted bare as `rowid`.
//! - Data values never appear in SQL text. Every value-bearing clause uses
//!   `?` placeholders bound from `Statement::params`.
//!
//! ## Predicates
//!
//! | Predicate              | Row identity                 | Other column              |
//! |------------------------|------------------------------|---------------------------|
//! | `Eq(v)`                | `rowid = ?`                  | `"c" = ?`                 |
//! | `In([..])`             | `rowid IN (?, ..)`           | `"c" IN (?, ..)`          |
//! | `Range { s, e }`       | `rowid BETWEEN ? AND ?` (e-1)| `"c" >= ? AND "c" < ?`    |
//! | `All`                  | no WHERE clause              | no WHERE clause           |
//!
//! A range bound left as `None` leaves that side unconstrained. The layer
//! store resolves open row-identity ranges to the table's minimum and maximum
//! row identity before calling the builder.

use super::select::Predicate;
use crate::config::{is_row_identity, ROWID};
use crate::types::{StoreType, Value};

/// SQL text with its positional parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub sql: String,
    pub params: Vec<Value>,
}

impl Statement {
    pub fn new(sql: impl Into<String>, params: Vec<Value>) -> Self {
        Self {
            sql: sql.into(),
            params,
        }
    }

    /// Statement without parameters.
    pub fn bare(sql: impl Into<String>) -> Self {
        Self::new(sql, Vec::new())
    }
}

/// Quotes an identifier for use in SQL text.
pub fn quote_ident(name: &str) -> String {
    if is_row_identity(name) {
        return ROWID.to_string();
    }
    format!("\"{}\"", name.replace('"', "\"\""))
}

fn column_list<S: AsRef<str>>(columns: &[S]) -> String {
    columns
        .iter()
        .map(|c| quote_ident(c.as_ref()))
        .collect::<Vec<_>>()
        .join(", ")
}

fn placeholders(count: usize) -> String {
    vec!["?"; count].join(", ")
}

fn membership(column: &str, count: usize) -> String {
    if count == 0 {
        "0 = 1".to_string()
    } else {
        format!("{} IN ({})", quote_ident(column), placeholders(count))
    }
}

pub fn build_create<S: AsRef<str>>(table: &str, column_defs: &[S]) -> Statement {
    let defs = column_defs
        .iter()
        .map(|d| d.as_ref())
        .collect::<Vec<&str>>()
        .join(", ");
    Statement::bare(format!("CREATE TABLE {} ({})", quote_ident(table), defs))
}

pub fn build_drop(table: &str) -> Statement {
    Statement::bare(format!("DROP TABLE IF EXISTS {}", quote_ident(table)))
}

/// Multi-row INSERT with `row_count` placeholder tuples. Parameters are bound
/// row-major by the caller.
pub fn build_insert<S: AsRef<str>>(table: &str, columns: &[S], row_count: usize) -> String {
    let tuple = format!("({})", placeholders(columns.len()));
    let tuples = vec![tuple.as_str(); row_count].join(", ");
    format!(
        "INSERT INTO {} ({}) VALUES {}",
        quote_ident(table),
        column_list(columns),
        tuples
    )
}

/// `= ?` for a single value, `IN (..)` for several.
pub fn build_delete(table: &str, where_col: &str, values: &[Value]) -> Statement {
    let clause = if values.len() == 1 {
        format!("{} = ?", quote_ident(where_col))
    } else {
        membership(where_col, values.len())
    };
    Statement::new(
        format!("DELETE FROM {} WHERE {}", quote_ident(table), clause),
        values.to_vec(),
    )
}

pub fn build_select_columns<S: AsRef<str>>(
    table: &str,
    columns: &[S],
    limit: Option<usize>,
) -> Statement {
    let mut sql = format!("SELECT {} FROM {}", column_list(columns), quote_ident(table));
    let mut params = Vec::new();
    if let Some(n) = limit {
        sql.push_str(" LIMIT ?");
        params.push(Value::Int(n as i64));
    }
    Statement::new(sql, params)
}

pub fn build_select_rows<S: AsRef<str>>(
    table: &str,
    columns: &[S],
    where_col: &str,
    predicate: &Predicate,
) -> Statement {
    let mut sql = format!("SELECT {} FROM {}", column_list(columns), quote_ident(table));
    let col = quote_ident(where_col);
    let mut params = Vec::new();

    let clause = match predicate {
        Predicate::All => None,
        Predicate::Eq(v) => {
            params.push(v.clone());
            Some(format!("{} = ?", col))
        }
        Predicate::In(values) => {
            params.extend(values.iter().cloned());
            Some(membership(where_col, values.len()))
        }
        Predicate::Range { start, end } => {
            let identity_bounds = match (start, end) {
                (Some(Value::Int(s)), Some(Value::Int(e))) if is_row_identity(where_col) => {
                    Some((*s, *e))
                }
                _ => None,
            };

            if let Some((s, e)) = identity_bounds {
                // An end of i64::MIN admits no row identity at all.
                match e.checked_sub(1) {
                    Some(last) => {
                        params.push(Value::Int(s));
                        params.push(Value::Int(last));
                        Some(format!("{} BETWEEN ? AND ?", col))
                    }
                    None => Some(membership(where_col, 0)),
                }
            } else {
                let mut parts = Vec::new();
                if let Some(s) = start {
                    params.push(s.clone());
                    parts.push(format!("{} >= ?", col));
                }
                if let Some(e) = end {
                    params.push(e.clone());
                    parts.push(format!("{} < ?", col));
                }
                (!parts.is_empty()).then(|| parts.join(" AND "))
            }
        }
    };

    if let Some(clause) = clause {
        sql.push_str(" WHERE ");
        sql.push_str(&clause);
    }
    Statement::new(sql, params)
}

pub fn build_rename(table: &str, new_name: &str) -> Statement {
    Statement::bare(format!(
        "ALTER TABLE {} RENAME TO {}",
        quote_ident(table),
        quote_ident(new_name)
    ))
}

pub fn build_rename_column(table: &str, column: &str, new_name: &str) -> Statement {
    Statement::bare(format!(
        "ALTER TABLE {} RENAME COLUMN {} TO {}",
        quote_ident(table),
        quote_ident(column),
        quote_ident(new_name)
    ))
}

pub fn build_add_column(table: &str, column: &str, store_type: StoreType) -> Statement {
    Statement::bare(format!(
        "ALTER TABLE {} ADD COLUMN {} {}",
        quote_ident(table),
        quote_ident(column),
        store_type
    ))
}

pub fn build_drop_column(table: &str, column: &str) -> Statement {
    Statement::bare(format!(
        "ALTER TABLE {} DROP COLUMN {}",
        quote_ident(table),
        quote_ident(column)
    ))
}

/// `UPDATE .. SET col = ? WHERE key = ?`, bound once per (value, key) pair.
pub fn build_update_column(table: &str, column: &str, key_col: &str) -> String {
    format!(
        "UPDATE {} SET {} = ? WHERE {} = ?",
        quote_ident(table),
        quote_ident(column),
        quote_ident(key_col)
    )
}

pub fn build_rowid_bounds(table: &str) -> Statement {
    Statement::bare(format!(
        "SELECT MIN(rowid), MAX(rowid) FROM {}",
        quote_ident(table)
    ))
}

/// Physical column names and declared types, in column order.
pub fn build_table_columns(table: &str) -> Statement {
    Statement::new(
        "SELECT name, type FROM pragma_table_info(?) ORDER BY cid",
        vec![Value::Text(table.to_string())],
    )
}
