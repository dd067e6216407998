// src/engine/dispatcher.rs

//! Runs the command belonging to a changed file and applies the error policy.

use tracing::{info, warn};

use crate::engine::WatchSpec;
use crate::errors::{Result, RuwnchError};
use crate::exec::{CommandExecutor, CommandResult};

/// What happened for one watched file in one cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    Unchanged { index: usize, file: String },
    Changed(DispatchReport),
}

impl CycleOutcome {
    pub fn is_changed(&self) -> bool {
        matches!(self, CycleOutcome::Changed(_))
    }
}

/// A command that ran because its file changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchReport {
    pub index: usize,
    /// Absolute path of the file that triggered the run.
    pub file: String,
    pub command: String,
    pub result: CommandResult,
}

/// Picks and runs commands for changed files.
///
/// Error policy: a command that writes anything to stderr has failed,
/// regardless of its exit code. With `quit_on_error` the failure is returned
/// as [`RuwnchError::CommandFailed`]; otherwise it is logged and the report
/// is returned normally.
pub struct Dispatcher<E: CommandExecutor> {
    executor: E,
    quit_on_error: bool,
}

impl<E: CommandExecutor> Dispatcher<E> {
    pub fn new(executor: E, quit_on_error: bool) -> Self {
        Self {
            executor,
            quit_on_error,
        }
    }

    /// Run the command for the file at `index`, whose absolute path is `file`.
    pub async fn dispatch(
        &mut self,
        spec: &WatchSpec,
        index: usize,
        file: &str,
    ) -> Result<DispatchReport> {
        let command = spec
            .command_for(index)
            .ok_or_else(|| {
                RuwnchError::ConfigError(format!(
                    "no command for file index {index} in {} mode",
                    spec.mode()
                ))
            })?
            .to_string();

        info!(
            file = %file,
            command = %command,
            index,
            "CHANGE detected; running command"
        );

        let result = self.executor.run(&command).await?;

        if result.is_error() {
            if self.quit_on_error {
                return Err(RuwnchError::CommandFailed {
                    command,
                    path: file.to_string(),
                    stderr: result.stderr,
                });
            }
            warn!(
                file = %file,
                command = %command,
                exit_code = ?result.exit_code,
                stderr = %result.stderr.trim_end(),
                "error when running command"
            );
        }

        Ok(DispatchReport {
            index,
            file: file.to_string(),
            command,
            result,
        })
    }
}
