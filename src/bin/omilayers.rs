//! # omilayers CLI Entry Point
//!
//! Binary entry point for the layer inspector.
//!
//! ## Usage
//!
//! ```bash
//! # Open (or create) a store
//! omilayers ./layers.sqlite
//!
//! # Open without write access
//! omilayers --read-only ./layers.sqlite
//!
//! # Statement-level logging
//! OMILAYERS_LOG=omilayers=debug omilayers ./layers.sqlite
//! ```

use eyre::{bail, Result, WrapErr};
use omilayers::cli::Repl;
use omilayers::LayerStore;
use std::env;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const LOG_ENV_VAR: &str = "OMILAYERS_LOG";

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    init_logging();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        return Ok(());
    }

    let mut read_only = false;
    let mut db_path: Option<PathBuf> = None;

    for arg in &args[1..] {
        match arg.as_str() {
            "--help" | "-h" => {
                print_usage();
                return Ok(());
            }
            "--version" | "-v" => {
                println!("omilayers {}", env!("CARGO_PKG_VERSION"));
                return Ok(());
            }
            "--read-only" | "-r" => {
                read_only = true;
            }
            arg if arg.starts_with('-') => {
                bail!("Unknown option: {}", arg);
            }
            path => {
                if db_path.is_some() {
                    bail!("Multiple database paths specified");
                }
                db_path = Some(PathBuf::from(path));
            }
        }
    }

    let db_path = match db_path {
        Some(p) => p,
        None => {
            print_usage();
            return Ok(());
        }
    };

    let store = LayerStore::builder()
        .path(&db_path)
        .read_only(read_only)
        .open()
        .wrap_err_with(|| format!("failed to open layer store at {:?}", db_path))?;

    let mut repl = Repl::new(store)?;
    repl.run()?;

    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn print_usage() {
    println!("omilayers - layer store inspector");
    println!();
    println!("USAGE:");
    println!("    omilayers [OPTIONS] <DB_PATH>");
    println!();
    println!("ARGS:");
    println!("    <DB_PATH>          Path to the SQLite store file");
    println!();
    println!("OPTIONS:");
    println!("    -r, --read-only    Open without write access");
    println!("    -h, --help         Print help information");
    println!("    -v, --version      Print version information");
    println!();
    println!("ENVIRONMENT:");
    println!("    OMILAYERS_LOG      Log filter (default: warn)");
    println!("    OMILAYERS_HISTORY  History file (empty disables history)");
}
