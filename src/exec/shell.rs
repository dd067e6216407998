// src/exec/shell.rs

use std::future::Future;
use std::pin::Pin;
use std::process::Stdio;

use anyhow::Context;
use tokio::process::Command;
use tracing::debug;

use crate::errors::Result;
use crate::exec::{CommandExecutor, CommandResult};

/// Runs commands through the platform shell and waits for them to exit.
#[derive(Debug, Clone, Default)]
pub struct ShellExecutor;

impl ShellExecutor {
    pub fn new() -> Self {
        Self
    }
}

impl CommandExecutor for ShellExecutor {
    fn run<'a>(
        &'a mut self,
        command: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<CommandResult>> + Send + 'a>> {
        Box::pin(run_shell(command))
    }
}

/// Build a shell command appropriate for the platform.
fn shell_command(command: &str) -> Command {
    if cfg!(windows) {
        let mut c = Command::new("cmd");
        c.arg("/C").arg(command);
        c
    } else {
        let mut c = Command::new("sh");
        c.arg("-c").arg(command);
        c
    }
}

async fn run_shell(command: &str) -> Result<CommandResult> {
    let mut cmd = shell_command(command);

    // Dropping the future (e.g. on Ctrl-C) kills the child.
    cmd.stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let output = cmd
        .output()
        .await
        .with_context(|| format!("spawning shell for command '{}'", command))?;

    let result = CommandResult {
        exit_code: output.status.code(),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    };

    debug!(
        command = %command,
        exit_code = ?result.exit_code,
        stdout = %result.stdout.trim_end(),
        stderr = %result.stderr.trim_end(),
        "command process exited"
    );

    Ok(result)
}
