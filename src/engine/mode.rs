// src/engine/mode.rs

//! Execution mode resolution.
//!
//! The mapping from files to commands is a pure function of how many of each
//! were given, decided once before the poll loop starts.

use tracing::debug;

use crate::errors::{Result, RuwnchError};
use crate::types::ExecutionMode;

/// Resolve the execution mode for `num_files` files and `num_commands`
/// commands.
///
/// - `(1, 1)` is [`ExecutionMode::SingleToSingle`].
/// - `(n, 1)` with `n > 1` is [`ExecutionMode::MultiToSingle`].
/// - `(n, n)` with `n > 1` is [`ExecutionMode::MultiToMulti`].
///
/// Anything else is [`RuwnchError::InvalidArity`].
pub fn resolve_mode(num_files: usize, num_commands: usize) -> Result<ExecutionMode> {
    let mode = match (num_files, num_commands) {
        (1, 1) => ExecutionMode::SingleToSingle,
        (files, 1) if files > 1 => ExecutionMode::MultiToSingle,
        (files, commands) if files == commands && files > 1 => ExecutionMode::MultiToMulti,
        (files, commands) => return Err(RuwnchError::InvalidArity { files, commands }),
    };

    debug!(num_files, num_commands, %mode, "resolved execution mode");
    Ok(mode)
}
