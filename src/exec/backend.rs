// src/exec/backend.rs

//! Pluggable executor abstraction.
//!
//! The dispatcher talks to a `CommandExecutor` instead of spawning processes
//! itself. Production code uses [`super::ShellExecutor`]; tests can provide
//! an implementation that records commands and returns scripted output.

use std::future::Future;
use std::pin::Pin;

use crate::errors::Result;
use crate::exec::CommandResult;

/// Trait abstracting how a command string is executed.
pub trait CommandExecutor: Send {
    /// Run `command` to completion and return its captured output.
    ///
    /// An `Err` means the command could not be run at all (e.g. the shell
    /// failed to spawn), not that it reported an error.
    fn run<'a>(
        &'a mut self,
        command: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<CommandResult>> + Send + 'a>>;
}
