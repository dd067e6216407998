// src/config/loader.rs

use std::path::Path;

use crate::config::model::{RawSettings, Settings};
use crate::errors::{Result, RuwnchError};
use crate::fs::FileSystem;

/// Default settings location, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "config.json";

/// Load a settings file and return the raw `RawSettings`.
///
/// This only performs JSON deserialization; it does **not** perform semantic
/// validation. Use [`load_and_validate`] for that.
pub fn load_from_path(fs: &dyn FileSystem, path: impl AsRef<Path>) -> Result<RawSettings> {
    let path = path.as_ref();
    let contents = fs.read_to_string(path).map_err(|err| {
        RuwnchError::ConfigError(format!("reading settings file at {:?}: {err:#}", path))
    })?;

    serde_json::from_str(&contents).map_err(|err| {
        RuwnchError::ConfigError(format!("parsing settings from {:?}: {err}", path))
    })
}

/// Load a settings file from path and validate it.
pub fn load_and_validate(fs: &dyn FileSystem, path: impl AsRef<Path>) -> Result<Settings> {
    let raw = load_from_path(fs, &path)?;
    Settings::try_from(raw)
}

/// Where the settings returned by [`load_or_init`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsSource {
    Existing,
    /// The file was missing and has just been written with defaults.
    Generated,
}

/// Recommended entry point for the binary: generate the settings file with
/// defaults if it does not exist yet, then load and validate it.
///
/// Runs before the logger exists, so it does not log. The caller reports a
/// [`SettingsSource::Generated`] file once logging is up.
pub fn load_or_init(
    fs: &dyn FileSystem,
    path: impl AsRef<Path>,
) -> Result<(Settings, SettingsSource)> {
    let path = path.as_ref();
    let source = if fs.exists(path) {
        SettingsSource::Existing
    } else {
        let json = serde_json::to_string_pretty(&RawSettings::default())?;
        fs.write(path, json.as_bytes())?;
        SettingsSource::Generated
    };
    Ok((load_and_validate(fs, path)?, source))
}
