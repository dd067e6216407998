// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::DEFAULT_CONFIG_PATH;
use crate::errors::{Result, RuwnchError};
use crate::watch::CACHE_FILE_PATH;

/// Printed after startup errors.
pub const USAGE: &str =
    "Usage: ruwnch <FILES: path | [path,path,...]> <COMMANDS: command | [command,command,...]>";

/// Command-line arguments for `ruwnch`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "ruwnch",
    version,
    about = "Poll files for content changes and run a shell command when they change.",
    long_about = None
)]
pub struct CliArgs {
    /// File to watch, or a bracketed list like `[a.txt,b.txt]`.
    ///
    /// Pass `last` on its own to replay the previous invocation.
    #[arg(value_name = "FILES")]
    pub files: String,

    /// Command to run, or a bracketed list with one command per file.
    #[arg(value_name = "COMMANDS")]
    pub commands: Option<String>,

    /// Path to the settings file (JSON). Generated with defaults if missing.
    #[arg(long, value_name = "PATH", default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Path to the cache file holding fingerprints and the last invocation.
    #[arg(long, value_name = "PATH", default_value = CACHE_FILE_PATH)]
    pub cache: PathBuf,

    /// Run a single poll cycle, persist, and exit.
    #[arg(long)]
    pub once: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `RUWNCH_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Resolve files and commands, print the wiring, but don't run anything.
    #[arg(long)]
    pub dry_run: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}

/// Split a positional argument into its entries.
///
/// `"[a.txt, b.txt]"` becomes `["a.txt", "b.txt"]`; anything not starting
/// with `[` is a single entry kept verbatim. List entries are trimmed and may
/// not be empty. Entries cannot themselves contain commas.
pub fn parse_list_argument(arg: &str) -> Result<Vec<String>> {
    let Some(inner) = arg.strip_prefix('[') else {
        if arg.trim().is_empty() {
            return Err(RuwnchError::ConfigError(
                "empty argument given where a path or command was expected".to_string(),
            ));
        }
        return Ok(vec![arg.to_string()]);
    };

    let inner = inner.strip_suffix(']').ok_or_else(|| {
        RuwnchError::ConfigError(format!("list argument {arg:?} is missing its closing ']'"))
    })?;

    inner
        .split(',')
        .map(|entry| {
            let entry = entry.trim();
            if entry.is_empty() {
                Err(RuwnchError::ConfigError(format!(
                    "list argument {arg:?} contains an empty entry"
                )))
            } else {
                Ok(entry.to_string())
            }
        })
        .collect()
}
