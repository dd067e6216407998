#![allow(dead_code)]

use std::path::PathBuf;

use ruwnch::cli::CliArgs;
use ruwnch::config::{RawSettings, Settings, DEFAULT_CONFIG_PATH};
use ruwnch::watch::CACHE_FILE_PATH;

/// Builder for `Settings` to simplify test setup.
///
/// Starts from the generated defaults but with colour off.
pub struct SettingsBuilder {
    raw: RawSettings,
}

impl SettingsBuilder {
    pub fn new() -> Self {
        Self {
            raw: RawSettings {
                use_colorama: false,
                ..RawSettings::default()
            },
        }
    }

    pub fn check_period(mut self, secs: u64) -> Self {
        self.raw.check_period = secs;
        self
    }

    pub fn hash_cache(mut self, val: bool) -> Self {
        self.raw.enable_hash_cache = val;
        self
    }

    pub fn last_command_cache(mut self, val: bool) -> Self {
        self.raw.enable_last_command_cache = val;
        self
    }

    pub fn quit_on_error(mut self, val: bool) -> Self {
        self.raw.quit_on_error = val;
        self
    }

    pub fn build(self) -> Settings {
        Settings::try_from(self.raw).expect("Failed to build valid settings from builder")
    }
}

impl Default for SettingsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `CliArgs` without going through `clap`.
pub struct CliArgsBuilder {
    args: CliArgs,
}

impl CliArgsBuilder {
    pub fn new(files: &str) -> Self {
        Self {
            args: CliArgs {
                files: files.to_string(),
                commands: None,
                config: PathBuf::from(DEFAULT_CONFIG_PATH),
                cache: PathBuf::from(CACHE_FILE_PATH),
                once: false,
                log_level: None,
                dry_run: false,
            },
        }
    }

    pub fn commands(mut self, commands: &str) -> Self {
        self.args.commands = Some(commands.to_string());
        self
    }

    pub fn once(mut self) -> Self {
        self.args.once = true;
        self
    }

    pub fn dry_run(mut self) -> Self {
        self.args.dry_run = true;
        self
    }

    pub fn build(self) -> CliArgs {
        self.args
    }
}
