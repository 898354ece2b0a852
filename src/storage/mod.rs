//! # Storage Module
//!
//! The boundary to the embedded SQLite engine. Nothing above this module
//! touches a `rusqlite::Connection` directly.
//!
//! ## Resource Model
//!
//! There is no connection pool and no in-process cache. Every operation opens
//! its own connection, runs one or more statements, and closes it before
//! returning. Cross-process concurrency relies entirely on SQLite's file
//! locking: writers are serialized, readers run alongside them, and a lock
//! held past the configured busy timeout surfaces as a store error.
//!
//! ## Module Organization
//!
//! - `gateway`: `Gateway` (connection factory) and `Session` (execute/fetch)

pub mod gateway;

pub use gateway::{Gateway, Session};
