//! # History File Management
//!
//! Resolves where the CLI keeps its command history. By default history is
//! stored in `~/.omilayers_history`.
//!
//! ## Configuration
//!
//! The location can be overridden with the `OMILAYERS_HISTORY` environment
//! variable:
//!
//! ```bash
//! export OMILAYERS_HISTORY=/custom/path/history
//! omilayers ./layers.sqlite
//! ```
//!
//! Setting `OMILAYERS_HISTORY` to an empty string disables persistence.

use std::env;
use std::path::PathBuf;

const DEFAULT_HISTORY_FILE: &str = ".omilayers_history";
const HISTORY_ENV_VAR: &str = "OMILAYERS_HISTORY";

/// Location of the history file, or `None` when history is disabled or no
/// home directory is known.
pub fn history_path() -> Option<PathBuf> {
    match env::var_os(HISTORY_ENV_VAR) {
        Some(custom) if custom.is_empty() => None,
        Some(custom) => Some(PathBuf::from(custom)),
        None => env::var_os("HOME").map(|home| PathBuf::from(home).join(DEFAULT_HISTORY_FILE)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // One test so the environment variable is never mutated concurrently.
    #[test]
    fn history_path_follows_environment() {
        env::remove_var(HISTORY_ENV_VAR);
        if let Some(path) = history_path() {
            assert!(path.to_string_lossy().ends_with(DEFAULT_HISTORY_FILE));
        }

        env::set_var(HISTORY_ENV_VAR, "/custom/path");
        assert_eq!(history_path(), Some(PathBuf::from("/custom/path")));

        env::set_var(HISTORY_ENV_VAR, "");
        assert_eq!(history_path(), None);

        env::remove_var(HISTORY_ENV_VAR);
    }
}
