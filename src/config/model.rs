// src/config/model.rs

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Settings exactly as stored in `config.json`.
///
/// ```json
/// {
///   "checkPeriod": 5,
///   "useColorama": true,
///   "enableHashCache": true,
///   "enableLastCommandCache": true,
///   "quitOnError": false
/// }
/// ```
///
/// Every key is required; a missing key is a configuration error rather than
/// a silent default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSettings {
    /// Seconds to sleep between poll cycles. Must be at least 1: a zero
    /// period is rejected at validation instead of busy-polling.
    pub check_period: u64,

    /// Decorate console output with ANSI colours.
    pub use_colorama: bool,

    /// Persist fingerprints across runs.
    pub enable_hash_cache: bool,

    /// Remember the last invocation so `ruwnch last` can replay it.
    pub enable_last_command_cache: bool,

    /// Stop the whole process when a command writes to stderr.
    pub quit_on_error: bool,
}

impl Default for RawSettings {
    fn default() -> Self {
        Self {
            check_period: 5,
            use_colorama: true,
            enable_hash_cache: true,
            enable_last_command_cache: true,
            quit_on_error: false,
        }
    }
}

/// Validated settings, built once at startup and passed explicitly to the
/// logger, the dispatcher and the poll loop.
///
/// Only obtainable through `TryFrom<RawSettings>` (see `validate.rs`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    check_period: Duration,
    use_color: bool,
    hash_cache: bool,
    last_command_cache: bool,
    quit_on_error: bool,
}

impl Settings {
    pub(crate) fn new_unchecked(raw: RawSettings) -> Self {
        Self {
            check_period: Duration::from_secs(raw.check_period),
            use_color: raw.use_colorama,
            hash_cache: raw.enable_hash_cache,
            last_command_cache: raw.enable_last_command_cache,
            quit_on_error: raw.quit_on_error,
        }
    }

    pub fn check_period(&self) -> Duration {
        self.check_period
    }

    pub fn use_color(&self) -> bool {
        self.use_color
    }

    pub fn hash_cache_enabled(&self) -> bool {
        self.hash_cache
    }

    pub fn last_command_cache_enabled(&self) -> bool {
        self.last_command_cache
    }

    pub fn quit_on_error(&self) -> bool {
        self.quit_on_error
    }
}
