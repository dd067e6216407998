use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use ruwnch::errors::Result;
use ruwnch::exec::{CommandExecutor, CommandResult};

/// A fake executor that:
/// - records which commands were "run", in order
/// - returns exit code 0 with scripted stderr (empty unless configured).
#[derive(Debug, Clone, Default)]
pub struct FakeExecutor {
    executed: Arc<Mutex<Vec<String>>>,
    stderr: HashMap<String, String>,
}

impl FakeExecutor {
    pub fn new(executed: Arc<Mutex<Vec<String>>>) -> Self {
        Self {
            executed,
            stderr: HashMap::new(),
        }
    }

    /// Make `command` report `stderr` whenever it runs.
    pub fn with_stderr(mut self, command: &str, stderr: &str) -> Self {
        self.stderr.insert(command.to_string(), stderr.to_string());
        self
    }
}

impl CommandExecutor for FakeExecutor {
    fn run<'a>(
        &'a mut self,
        command: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<CommandResult>> + Send + 'a>> {
        Box::pin(async move {
            {
                let mut guard = self.executed.lock().unwrap();
                guard.push(command.to_string());
            }

            Ok(CommandResult {
                exit_code: Some(0),
                stdout: String::new(),
                stderr: self.stderr.get(command).cloned().unwrap_or_default(),
            })
        })
    }
}

/// Snapshot of the commands recorded so far.
pub fn executed(log: &Arc<Mutex<Vec<String>>>) -> Vec<String> {
    log.lock().unwrap().clone()
}
