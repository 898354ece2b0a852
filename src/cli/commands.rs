//! # Dot Command Handler
//!
//! Parses and executes the dot commands of the layer inspector.
//!
//! ## Supported Commands
//!
//! | Command                  | Description                                 |
//! |--------------------------|---------------------------------------------|
//! | `.layers [TAG]`          | Catalog listing, optionally for one tag     |
//! | `.head LAYER [N]`        | First N rows of a layer (default 5)         |
//! | `.columns LAYER`         | Column names of a layer                     |
//! | `.shape LAYER`           | Stored shape of a layer                     |
//! | `.info LAYER [TEXT]`     | Show or set a layer's description           |
//! | `.tag LAYER [TAG]`       | Show or set a layer's tag                   |
//! | `.rename LAYER NEW`      | Rename a layer                              |
//! | `.drop LAYER`            | Drop a layer                                |
//! | `.help`                  | Show available commands                     |
//! | `.quit` / `.exit`        | Exit the CLI                                |
//!
//! ## Parsing
//!
//! Command names are case-insensitive. Arguments are whitespace-separated,
//! except that the description given to `.info` is the rest of the line.
//! Unrecognized commands and store errors come back as `CommandResult::Error`.

use crate::cli::table::TableFormatter;
use crate::sql::ColumnSelection;
use crate::LayerStore;

const DEFAULT_HEAD_ROWS: usize = 5;

#[derive(Debug, PartialEq)]
pub enum CommandResult {
    Output(String),
    Exit,
    Continue,
    Error(String),
}

impl<T: std::fmt::Display> From<crate::Result<T>> for CommandResult {
    fn from(result: crate::Result<T>) -> Self {
        match result {
            Ok(value) => CommandResult::Output(value.to_string()),
            Err(err) => CommandResult::Error(err.to_string()),
        }
    }
}

pub struct CommandHandler;

impl CommandHandler {
    pub fn is_command(input: &str) -> bool {
        input.trim().starts_with('.')
    }

    pub fn execute(input: &str, store: &LayerStore) -> CommandResult {
        let input = input.trim();
        let words: Vec<&str> = input.split_whitespace().collect();
        let Some((first, args)) = words.split_first() else {
            return CommandResult::Continue;
        };
        let cmd = first.to_ascii_lowercase();

        match cmd.as_str() {
            ".quit" | ".exit" | ".q" => CommandResult::Exit,
            ".help" | ".h" | ".?" => CommandResult::Output(help_text()),
            ".layers" | ".tables" => list_layers(store, args.first().copied()),
            ".head" => head(store, args),
            ".columns" => with_layer(args, ".columns LAYER", |name| {
                store.column_names(name).map(|cols| cols.join("\n")).into()
            }),
            ".shape" => with_layer(args, ".shape LAYER", |name| {
                store
                    .entry(name)
                    .map(|e| format!("({}, {})", e.shape.rows, e.shape.cols))
                    .into()
            }),
            ".info" => info(store, input, args),
            ".tag" => tag(store, args),
            ".rename" => match args {
                [name, new_name] => store
                    .rename(name, new_name)
                    .map(|_| format!("Layer '{}' renamed to '{}'", name, new_name))
                    .into(),
                _ => usage(".rename LAYER NEW"),
            },
            ".drop" => with_layer(args, ".drop LAYER", |name| {
                store
                    .drop_table(name)
                    .map(|_| format!("Layer '{}' dropped", name))
                    .into()
            }),
            _ => CommandResult::Error(format!(
                "Unknown command: {}. Type .help for available commands.",
                cmd
            )),
        }
    }
}

fn help_text() -> String {
    r#"omilayers CLI Commands:

  .layers [TAG]        List layers (optionally only those with TAG)
  .head LAYER [N]      Show the first N rows of LAYER (default 5)
  .columns LAYER       List the columns of LAYER
  .shape LAYER         Show the (rows, columns) shape of LAYER
  .info LAYER [TEXT]   Show, or set to TEXT, the description of LAYER
  .tag LAYER [TAG]     Show, or set to TAG, the tag of LAYER
  .rename LAYER NEW    Rename LAYER to NEW
  .drop LAYER          Drop LAYER
  .help               This message (.h and .? also work)
  .quit               Leave the inspector (.exit, .q, Ctrl+D)"#
        .to_string()
}

fn usage(text: &str) -> CommandResult {
    CommandResult::Error(format!("Usage: {}", text))
}

fn with_layer<F>(args: &[&str], usage_text: &str, f: F) -> CommandResult
where
    F: FnOnce(&str) -> CommandResult,
{
    match args {
        [name] => f(*name),
        _ => usage(usage_text),
    }
}

fn list_layers(store: &LayerStore, tag: Option<&str>) -> CommandResult {
    let entries = match store.entries(tag) {
        Ok(entries) => entries,
        Err(err) => return CommandResult::Error(err.to_string()),
    };

    if entries.is_empty() {
        return CommandResult::Output("No layers found.".to_string());
    }

    let headers = ["name", "tag", "shape", "info"]
        .iter()
        .map(|h| h.to_string())
        .collect();
    let rows = entries
        .into_iter()
        .map(|e| {
            vec![
                e.name,
                e.tag.unwrap_or_default(),
                e.shape.to_string(),
                e.info.unwrap_or_default(),
            ]
        })
        .collect();

    CommandResult::Output(TableFormatter::from_cells(headers, rows).render())
}

fn head(store: &LayerStore, args: &[&str]) -> CommandResult {
    let (name, rows) = match args {
        [name] => (*name, DEFAULT_HEAD_ROWS),
        [name, n] => match n.parse::<usize>() {
            Ok(n) => (*name, n),
            Err(_) => return CommandResult::Error(format!("Invalid row count: {}", n)),
        },
        _ => return usage(".head LAYER [N]"),
    };

    match store.select_columns(name, &ColumnSelection::all(), Some(rows)) {
        Ok(frame) => CommandResult::Output(TableFormatter::from_frame(&frame).render()),
        Err(err) => CommandResult::Error(err.to_string()),
    }
}

fn info(store: &LayerStore, input: &str, args: &[&str]) -> CommandResult {
    match args {
        [] => usage(".info LAYER [TEXT]"),
        [name] => store
            .get_info(name)
            .map(|info| info.unwrap_or_else(|| "(no info)".to_string()))
            .into(),
        [name, ..] => {
            let text = rest_after(input, 2);
            store
                .set_info(name, text)
                .map(|_| format!("Info of '{}' updated", name))
                .into()
        }
    }
}

fn tag(store: &LayerStore, args: &[&str]) -> CommandResult {
    match args {
        [name] => store
            .get_tag(name)
            .map(|tag| tag.unwrap_or_else(|| "(no tag)".to_string()))
            .into(),
        [name, tag] => store
            .set_tag(name, tag)
            .map(|_| format!("Tag of '{}' set to '{}'", name, tag))
            .into(),
        _ => usage(".tag LAYER [TAG]"),
    }
}

/// Remainder of `input` after its first `skip` whitespace-separated words.
fn rest_after(input: &str, skip: usize) -> &str {
    let mut rest = input.trim_start();
    for _ in 0..skip {
        rest = match rest.find(char::is_whitespace) {
            Some(end) => rest[end..].trim_start(),
            None => "",
        };
    }
    rest.trim_end()
}
