// src/config/mod.rs

//! Settings loading and validation for ruwnch.
//!
//! Responsibilities:
//! - Define the JSON-backed settings model (`model.rs`).
//! - Load (or first generate) the settings file (`loader.rs`).
//! - Validate basic invariants like a non-zero check period (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{
    load_and_validate, load_from_path, load_or_init, SettingsSource, DEFAULT_CONFIG_PATH,
};
pub use model::{RawSettings, Settings};
