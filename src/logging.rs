// src/logging.rs

//! Logging setup for `ruwnch` using `tracing` + `tracing-subscriber`.
//!
//! Priority for determining the log level:
//! 1. `--log-level` CLI flag (if provided)
//! 2. `RUWNCH_LOG` environment variable (e.g. "info", "debug")
//! 3. default to `info`
//!
//! Logs are sent to STDERR so that stdout stays free for command output.

use anyhow::{anyhow, Result};
use tracing_subscriber::fmt;
use tracing_subscriber::fmt::time::ChronoLocal;

use crate::cli::LogLevel;

/// Timestamp layout for log lines, e.g. `19-10-2026 14:05`.
pub const LOG_TIME_FORMAT: &str = "%d-%m-%Y %H:%M";

/// Initialise global logging subscriber.
///
/// `use_color` comes from the `useColorama` setting and toggles ANSI output.
/// Safe to call once at startup.
pub fn init_logging(cli_level: Option<LogLevel>, use_color: bool) -> Result<()> {
    let level = match cli_level {
        Some(lvl) => level_from_log_level(lvl),
        None => std::env::var("RUWNCH_LOG")
            .ok()
            .and_then(|s| parse_level_str(&s))
            .unwrap_or(tracing::Level::INFO),
    };

    fmt()
        .with_max_level(level)
        .with_target(false)
        .with_ansi(use_color)
        .with_timer(ChronoLocal::new(LOG_TIME_FORMAT.to_string()))
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("failed to initialise logging: {e}"))?;

    Ok(())
}

fn level_from_log_level(lvl: LogLevel) -> tracing::Level {
    match lvl {
        LogLevel::Error => tracing::Level::ERROR,
        LogLevel::Warn => tracing::Level::WARN,
        LogLevel::Info => tracing::Level::INFO,
        LogLevel::Debug => tracing::Level::DEBUG,
        LogLevel::Trace => tracing::Level::TRACE,
    }
}

fn parse_level_str(s: &str) -> Option<tracing::Level> {
    match s.trim().to_lowercase().as_str() {
        "error" => Some(tracing::Level::ERROR),
        "warn" | "warning" => Some(tracing::Level::WARN),
        "info" => Some(tracing::Level::INFO),
        "debug" => Some(tracing::Level::DEBUG),
        "trace" => Some(tracing::Level::TRACE),
        _ => None,
    }
}
