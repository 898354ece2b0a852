//! # Store Gateway
//!
//! Owns the path and settings of one SQLite file and hands out short-lived
//! [`Session`]s over it. Each call to [`Gateway::with_session`] or
//! [`Gateway::transaction`] opens a fresh connection, runs the closure, and
//! closes the connection before returning, so every read sees the latest
//! committed state of the file.
//!
//! ## Connection Lifecycle
//!
//! ```text
//! open (flags from config, busy_timeout)
//!   │
//!   ├─ with_session:  closure runs in auto-commit mode
//!   └─ transaction:   BEGIN → closure → COMMIT
//!                     (closure error → ROLLBACK when the transaction drops)
//!   │
//! close (result checked, failure surfaced)
//! ```
//!
//! A closure error always wins over a close error; a close error after a
//! successful closure is returned to the caller.

use crate::config::StoreConfig;
use crate::error::Result;
use crate::sql::Statement;
use crate::types::Value;
use rusqlite::{params_from_iter, Connection, OpenFlags, Row};
use std::path::Path;
use tracing::{debug, warn};

/// Per-operation connection factory for one store file.
#[derive(Debug, Clone)]
pub struct Gateway {
    config: StoreConfig,
}

impl Gateway {
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn path(&self) -> &Path {
        &self.config.path
    }

    fn open(&self) -> Result<Connection> {
        let flags = if self.config.read_only {
            OpenFlags::SQLITE_OPEN_READ_ONLY
                | OpenFlags::SQLITE_OPEN_URI
                | OpenFlags::SQLITE_OPEN_NO_MUTEX
        } else {
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_URI
                | OpenFlags::SQLITE_OPEN_NO_MUTEX
        };

        let conn = Connection::open_with_flags(&self.config.path, flags)?;
        conn.busy_timeout(self.config.busy_timeout)?;
        Ok(conn)
    }

    /// Runs `f` on a fresh auto-commit connection.
    pub fn with_session<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Session<'_>) -> Result<T>,
    {
        let conn = self.open()?;
        let result = f(&Session::new(&conn));
        close(conn, result)
    }

    /// Runs `f` inside a single transaction on a fresh connection.
    ///
    /// The transaction commits only if `f` succeeds; otherwise every
    /// statement `f` executed is rolled back.
    pub fn transaction<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Session<'_>) -> Result<T>,
    {
        let mut conn = self.open()?;
        let result = run_in_transaction(&mut conn, f);
        close(conn, result)
    }
}

fn run_in_transaction<T, F>(conn: &mut Connection, f: F) -> Result<T>
where
    F: FnOnce(&Session<'_>) -> Result<T>,
{
    let tx = conn.transaction()?;
    let value = f(&Session::new(&tx))?;
    tx.commit()?;
    Ok(value)
}

fn close<T>(conn: Connection, result: Result<T>) -> Result<T> {
    match conn.close() {
        Ok(()) => result,
        Err((_, err)) => {
            warn!(error = %err, "failed to close store connection");
            match result {
                Ok(_) => Err(err.into()),
                Err(original) => Err(original),
            }
        }
    }
}

/// Statement execution over one open connection.
pub struct Session<'c> {
    conn: &'c Connection,
}

impl<'c> Session<'c> {
    fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    /// Executes a statement, returning the number of changed rows.
    pub fn execute(&self, stmt: &Statement) -> Result<usize> {
        debug!(sql = %stmt.sql, params = stmt.params.len(), "execute");
        Ok(self
            .conn
            .execute(&stmt.sql, params_from_iter(stmt.params.iter()))?)
    }

    /// Prepares `sql` once and executes it for every parameter row.
    pub fn execute_batch<I>(&self, sql: &str, rows: I) -> Result<usize>
    where
        I: IntoIterator<Item = Vec<Value>>,
    {
        debug!(sql = %sql, "execute batch");
        let mut prepared = self.conn.prepare(sql)?;
        let mut changed = 0;
        for params in rows {
            changed += prepared.execute(params_from_iter(params.iter()))?;
        }
        Ok(changed)
    }

    pub fn fetch_one(&self, stmt: &Statement) -> Result<Option<Vec<Value>>> {
        debug!(sql = %stmt.sql, params = stmt.params.len(), "fetch one");
        let mut prepared = self.conn.prepare(&stmt.sql)?;
        let width = prepared.column_count();
        let mut rows = prepared.query(params_from_iter(stmt.params.iter()))?;
        let first = match rows.next()? {
            Some(row) => Some(read_row(row, width)?),
            None => None,
        };
        Ok(first)
    }

    pub fn fetch_all(&self, stmt: &Statement) -> Result<Vec<Vec<Value>>> {
        debug!(sql = %stmt.sql, params = stmt.params.len(), "fetch all");
        let mut prepared = self.conn.prepare(&stmt.sql)?;
        let width = prepared.column_count();
        let mut rows = prepared.query(params_from_iter(stmt.params.iter()))?;
        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            out.push(read_row(row, width)?);
        }
        Ok(out)
    }
}

fn read_row(row: &Row<'_>, width: usize) -> rusqlite::Result<Vec<Value>> {
    (0..width).map(|i| row.get::<_, Value>(i)).collect()
}
