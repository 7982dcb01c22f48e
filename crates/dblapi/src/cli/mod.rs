//! Command-line interface module.

mod commands;
mod directory;
mod serve;

pub use commands::{Cli, Commands, DirectoryCommands, WidgetArgs};
pub use directory::{handle_directory_command, print_widget};
pub use serve::serve;

use dblapi::{ConfigError, DblApiOptions, DblResult};
use std::path::Path;

/// Options from `path`, or defaults when no file is given.
pub fn load_options(path: Option<&Path>) -> DblResult<DblApiOptions> {
    match path {
        Some(path) => DblApiOptions::from_file(path),
        None => Ok(DblApiOptions::default()),
    }
}

/// Token from `--token`, falling back to `DBL_TOKEN`.
pub fn token(flag: Option<String>) -> DblResult<String> {
    flag.or_else(|| std::env::var("DBL_TOKEN").ok())
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| {
            ConfigError::new("Missing required parameter: token (pass --token or set DBL_TOKEN)")
                .into()
        })
}
