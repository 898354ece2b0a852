//! # omilayers CLI Module
//!
//! An interactive inspector for a layer store file. It lists the catalog,
//! previews layers and edits layer metadata through dot commands.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      CLI Entry Point                        │
//! │                    (bin/omilayers.rs)                       │
//! ├─────────────────────────────────────────────────────────────┤
//! │                         REPL Loop                           │
//! │  - Reads input via rustyline                                │
//! │  - Dispatches dot commands                                  │
//! │  - Prints results and errors                                │
//! ├─────────────────────────────────────────────────────────────┤
//! │     Commands          │    Table Formatter    │   History   │
//! │  (.layers, .head,     │  ASCII box drawing    │  Persistent │
//! │   .info, .tag, ...)   │  for frames/catalog   │  ~/.omi*    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Open (or create) a store
//! omilayers ./layers.sqlite
//!
//! # Inspect without write access
//! omilayers --read-only ./layers.sqlite
//! ```
//!
//! ## Table Display
//!
//! ```text
//! +--------+-----+-------+--------------------+
//! | name   | tag | shape | info               |
//! +--------+-----+-------+--------------------+
//! | layer1 | raw | 10x3  | first ten samples  |
//! +--------+-----+-------+--------------------+
//! ```
//!
//! ## Module Organization
//!
//! - `repl`: read-eval-print loop with rustyline integration
//! - `commands`: dot command parsing and execution
//! - `table`: ASCII table formatter
//! - `history`: history file path resolution

pub mod commands;
pub mod history;
pub mod repl;
pub mod table;

pub use repl::Repl;
