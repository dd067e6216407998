// src/exec/mod.rs

//! Process execution layer.
//!
//! This module is responsible for actually running the shell command picked
//! by the dispatcher, using `tokio::process::Command`, and handing back what
//! the command printed.
//!
//! - [`backend`] provides the `CommandExecutor` trait the dispatcher talks
//!   to, which tests can replace with a fake implementation.
//! - [`shell`] is the production executor that spawns `sh -c <cmd>`.

pub mod backend;
pub mod shell;

pub use backend::CommandExecutor;
pub use shell::ShellExecutor;

/// Captured outcome of one command execution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandResult {
    /// Exit code, or `None` if the process was killed by a signal.
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandResult {
    /// Any stderr output counts as an error, whatever the exit code.
    pub fn is_error(&self) -> bool {
        !self.stderr.is_empty()
    }

    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}
