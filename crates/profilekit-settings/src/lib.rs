//! ProfileKit Settings Crate
//!
//! Offset run configuration with JSON/TOML persistence and validation.

pub mod config;
pub mod error;

pub use config::{OffsetSettings, SettingsOverrides};
pub use error::{Result, SettingsError};
