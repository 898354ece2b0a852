//! # REPL - Read-Eval-Print Loop
//!
//! The interactive loop of the layer inspector. Handles:
//!
//! - Reading input with rustyline (history, line editing)
//! - Dispatching dot commands to the command handler
//! - Printing command output and errors
//!
//! ## Execution Flow
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                     Read Line                            │
//! └──────────────────────────────────────────────────────────┘
//!                           │
//!                           ▼
//! ┌──────────────────────────────────────────────────────────┐
//! │              Starts with '.'?                            │
//! └──────────────────────────────────────────────────────────┘
//!           │ Yes                          │ No
//!           ▼                              ▼
//! ┌──────────────────┐          ┌──────────────────────────┐
//! │ Execute Command  │          │ Report non-command       │
//! └──────────────────┘          └──────────────────────────┘
//!           │                              │
//!           ▼                              ▼
//!                       [Loop]
//! ```
//!
//! ## Error Handling
//!
//! Command errors are displayed but do not terminate the REPL.
//! Use `.quit` or Ctrl+D to exit.

use crate::cli::commands::{CommandHandler, CommandResult};
use crate::cli::history::history_path;
use crate::LayerStore;
use eyre::{Result, WrapErr};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::ops::ControlFlow;
use std::time::Instant;

const PROMPT: &str = "omilayers> ";

pub struct Repl {
    store: LayerStore,
    editor: DefaultEditor,
}

impl Repl {
    pub fn new(store: LayerStore) -> Result<Self> {
        let mut editor = DefaultEditor::new().wrap_err("failed to initialize line editor")?;

        // A missing history file is normal on first start.
        if let Some(file) = history_path() {
            editor.load_history(&file).ok();
        }

        Ok(Self { store, editor })
    }

    pub fn run(&mut self) -> Result<()> {
        self.banner();

        while let ControlFlow::Continue(()) = self.step() {}

        self.persist_history();
        Ok(())
    }

    fn step(&mut self) -> ControlFlow<()> {
        match self.editor.readline(PROMPT) {
            Ok(line) => self.dispatch(line.trim()),
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                ControlFlow::Continue(())
            }
            Err(ReadlineError::Eof) => ControlFlow::Break(()),
            Err(err) => {
                eprintln!("Error reading input: {}", err);
                ControlFlow::Break(())
            }
        }
    }

    fn dispatch(&mut self, input: &str) -> ControlFlow<()> {
        if input.is_empty() {
            return ControlFlow::Continue(());
        }
        self.editor.add_history_entry(input).ok();

        if !CommandHandler::is_command(input) {
            eprintln!("Error: '{}' is not a dot command (try .help)", input);
            return ControlFlow::Continue(());
        }

        let started = Instant::now();
        match CommandHandler::execute(input, &self.store) {
            CommandResult::Exit => return ControlFlow::Break(()),
            CommandResult::Output(text) => {
                println!("{}", text);
                println!("({:.3} sec)", started.elapsed().as_secs_f64());
            }
            CommandResult::Error(msg) => eprintln!("Error: {}", msg),
            CommandResult::Continue => {}
        }
        ControlFlow::Continue(())
    }

    fn banner(&self) {
        let mode = if self.store.is_read_only() {
            "read-only"
        } else {
            "read-write"
        };
        println!("omilayers {}", env!("CARGO_PKG_VERSION"));
        println!("Store: {} ({})", self.store.path().display(), mode);
        println!("Type .help for commands, .quit or Ctrl+D to leave.");
        println!();
    }

    fn persist_history(&mut self) {
        let Some(file) = history_path() else {
            return;
        };
        if let Err(err) = self.editor.save_history(&file) {
            eprintln!("Warning: could not save history to {}: {}", file.display(), err);
        }
    }
}
