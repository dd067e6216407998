use std::fmt;

/// How watched files are wired to commands.
///
/// Derived once at startup from the number of files and commands; see
/// [`crate::engine::mode::resolve_mode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExecutionMode {
    /// One file, one command.
    SingleToSingle,
    /// Many files share a single command.
    MultiToSingle,
    /// File `i` runs command `i`.
    MultiToMulti,
}

impl ExecutionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExecutionMode::SingleToSingle => "single_to_single",
            ExecutionMode::MultiToSingle => "multi_to_single",
            ExecutionMode::MultiToMulti => "multi_to_multi",
        }
    }
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
