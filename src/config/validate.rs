// src/config/validate.rs

use crate::config::model::{RawSettings, Settings};
use crate::errors::{Result, RuwnchError};

impl TryFrom<RawSettings> for Settings {
    type Error = RuwnchError;

    fn try_from(raw: RawSettings) -> std::result::Result<Self, Self::Error> {
        validate_raw_settings(&raw)?;
        Ok(Settings::new_unchecked(raw))
    }
}

fn validate_raw_settings(raw: &RawSettings) -> Result<()> {
    validate_check_period(raw)?;
    Ok(())
}

/// A zero period would re-hash every file in a tight loop.
fn validate_check_period(raw: &RawSettings) -> Result<()> {
    if raw.check_period == 0 {
        return Err(RuwnchError::ConfigError(
            "checkPeriod must be >= 1 second (got 0)".to_string(),
        ));
    }
    Ok(())
}
