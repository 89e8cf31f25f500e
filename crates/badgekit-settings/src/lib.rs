//! BadgeKit Settings Crate
//!
//! Handles engine tunables and storage configuration, persisted as JSON or
//! TOML in the platform configuration directory.

pub mod config;
pub mod error;

pub use config::{Config, DesignerSettings, StorageSettings};
pub use error::{ConfigError, SettingsError, SettingsResult};
