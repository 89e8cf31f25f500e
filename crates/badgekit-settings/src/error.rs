//! Settings file errors.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("cannot access settings file: {0}")]
    Io(#[from] io::Error),

    #[error("malformed JSON settings: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed TOML settings: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("cannot encode settings as TOML: {0}")]
    TomlEncode(#[from] toml::ser::Error),

    #[error(transparent)]
    Invalid(#[from] ConfigError),
}

/// Rejected configuration values and locations.
#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    /// Settings files must end in `.json` or `.toml`.
    #[error("settings file extension '{0}' is neither json nor toml")]
    UnsupportedExtension(String),

    #[error("{key} = {value} is out of range")]
    OutOfRange { key: &'static str, value: String },

    #[error("platform has no configuration directory")]
    NoConfigDirectory,
}

pub type SettingsResult<T> = Result<T, SettingsError>;
