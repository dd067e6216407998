// src/errors.rs

//! Crate-wide error type and result alias.
//!
//! Every error that can stop `ruwnch` maps to one of these variants. Only
//! `main.rs` turns an error into a process exit.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RuwnchError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error(
        "Number of arguments incorrect: {files} file(s) cannot be paired with {commands} command(s) \
         (use one command for any number of files, or one command per file)"
    )]
    InvalidArity { files: usize, commands: usize },

    #[error("cannot read watched file {path:?}: {reason}")]
    FileAccess { path: PathBuf, reason: String },

    #[error("Error when running command ({command}) for file ({path}). STDERR -> {stderr}")]
    CommandFailed {
        command: String,
        path: String,
        stderr: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RuwnchError {
    /// Errors raised before the poll loop starts; `main` prints the usage line
    /// after these.
    pub fn is_startup_error(&self) -> bool {
        matches!(
            self,
            RuwnchError::ConfigError(_) | RuwnchError::InvalidArity { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, RuwnchError>;
