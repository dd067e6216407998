// src/invocation.rs

//! Turning the positional arguments into a [`WatchSpec`], including the
//! `ruwnch last` replay.

use tracing::info;

use crate::cli::{parse_list_argument, CliArgs};
use crate::config::Settings;
use crate::engine::WatchSpec;
use crate::errors::{Result, RuwnchError};
use crate::fs::FileSystem;
use crate::watch::load_last_invocation;

/// Positional argument that replays the stored invocation.
pub const LAST_KEYWORD: &str = "last";

/// Program name stored as the first element of a saved invocation.
pub const PROGRAM_NAME: &str = "ruwnch";

/// The two positional arguments, unparsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub files: String,
    pub commands: String,
}

impl Invocation {
    pub fn new(files: impl Into<String>, commands: impl Into<String>) -> Self {
        Self {
            files: files.into(),
            commands: commands.into(),
        }
    }

    /// Work out what to run from the CLI arguments, replaying the last
    /// invocation stored in the cache file for `ruwnch last`.
    pub fn resolve(args: &CliArgs, settings: &Settings, fs: &dyn FileSystem) -> Result<Self> {
        match &args.commands {
            Some(commands) => Ok(Self::new(args.files.clone(), commands.clone())),
            None if args.files == LAST_KEYWORD && settings.last_command_cache_enabled() => {
                let argv = load_last_invocation(fs, &args.cache)?.ok_or_else(|| {
                    RuwnchError::ConfigError(format!(
                        "No last invocation found in {:?}",
                        args.cache
                    ))
                })?;
                let invocation = Self::from_argv(&argv)?;
                info!(
                    files = %invocation.files,
                    commands = %invocation.commands,
                    "replaying last invocation"
                );
                Ok(invocation)
            }
            None => Err(RuwnchError::ConfigError(format!(
                "Wrong number of arguments given: expected <FILES> <COMMANDS>, got only {:?}",
                args.files
            ))),
        }
    }

    /// Parse a stored `[program, files, commands]` list.
    pub fn from_argv(argv: &[String]) -> Result<Self> {
        match argv {
            [_program, files, commands] => Ok(Self::new(files.clone(), commands.clone())),
            other => Err(RuwnchError::ConfigError(format!(
                "Wrong number of arguments ({}) in stored invocation {:?}",
                other.len(),
                other
            ))),
        }
    }

    /// The list stored in the cache's `last` field.
    pub fn to_argv(&self) -> Vec<String> {
        vec![
            PROGRAM_NAME.to_string(),
            self.files.clone(),
            self.commands.clone(),
        ]
    }

    /// Parse both arguments and resolve the execution mode.
    pub fn to_spec(&self) -> Result<WatchSpec> {
        let files = parse_list_argument(&self.files)?;
        let commands = parse_list_argument(&self.commands)?;
        WatchSpec::new(files, commands)
    }
}
