// src/engine/spec.rs

use std::path::PathBuf;

use crate::engine::mode::resolve_mode;
use crate::errors::Result;
use crate::types::ExecutionMode;

/// What to watch and what to run, fixed for the lifetime of a run.
///
/// Files are kept in the order given and are not deduplicated. The mode is
/// always consistent with the two lengths because the only constructor
/// resolves it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchSpec {
    files: Vec<PathBuf>,
    commands: Vec<String>,
    mode: ExecutionMode,
}

impl WatchSpec {
    /// Build a spec, rejecting file/command counts that have no mode.
    pub fn new<F, C>(files: F, commands: C) -> Result<Self>
    where
        F: IntoIterator,
        F::Item: Into<PathBuf>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        let files: Vec<PathBuf> = files.into_iter().map(Into::into).collect();
        let commands: Vec<String> = commands.into_iter().map(Into::into).collect();
        let mode = resolve_mode(files.len(), commands.len())?;
        Ok(Self {
            files,
            commands,
            mode,
        })
    }

    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    pub fn commands(&self) -> &[String] {
        &self.commands
    }

    pub fn mode(&self) -> ExecutionMode {
        self.mode
    }

    /// Command to run when the file at position `index` changes.
    ///
    /// Lookup is positional, so duplicate file entries still map to their
    /// own command in multi-to-multi mode.
    pub fn command_for(&self, index: usize) -> Option<&str> {
        if index >= self.files.len() {
            return None;
        }
        match self.mode {
            ExecutionMode::SingleToSingle | ExecutionMode::MultiToSingle => {
                self.commands.first().map(String::as_str)
            }
            ExecutionMode::MultiToMulti => self.commands.get(index).map(String::as_str),
        }
    }
}
