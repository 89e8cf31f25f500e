//! Configuration and settings management for BadgeKit
//!
//! Provides configuration file handling and validation. Supports JSON and
//! TOML file formats stored in the platform-specific config directory.
//!
//! Configuration is organized into two sections:
//! - Designer tunables (resolution, history depth, snapping, nudging)
//! - Storage (where saved badge documents live)

use badgekit_core::constants::{
    MAX_HISTORY, MIN_ELEMENT_SIZE_PX, NUDGE_STEP_LARGE_PX, NUDGE_STEP_PX, PASTE_OFFSET_PX,
    SNAP_THRESHOLD_PX,
};
use badgekit_core::{FormatPreset, DEFAULT_DPI};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, SettingsResult};

/// Editing engine tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignerSettings {
    /// Print resolution used for mm to px conversion
    pub dpi: f64,
    /// Maximum undo/redo snapshots kept
    pub max_history: usize,
    /// Whether drag snapping is active
    pub snap_enabled: bool,
    /// Snap distance in badge pixels
    pub snap_threshold_px: f64,
    /// Offset applied to pasted and duplicated elements
    pub paste_offset_px: f64,
    /// Arrow-key nudge step
    pub nudge_step_px: f64,
    /// Arrow-key nudge step with the modifier held
    pub nudge_step_large_px: f64,
    /// Minimum element width/height after a resize
    pub min_element_size_px: f64,
    /// Format used for new documents
    pub default_format: FormatPreset,
}

impl Default for DesignerSettings {
    fn default() -> Self {
        Self {
            dpi: DEFAULT_DPI,
            max_history: MAX_HISTORY,
            snap_enabled: true,
            snap_threshold_px: SNAP_THRESHOLD_PX,
            paste_offset_px: PASTE_OFFSET_PX,
            nudge_step_px: NUDGE_STEP_PX,
            nudge_step_large_px: NUDGE_STEP_LARGE_PX,
            min_element_size_px: MIN_ELEMENT_SIZE_PX,
            default_format: FormatPreset::default(),
        }
    }
}

/// Document storage settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Directory holding saved badge documents
    pub documents_dir: PathBuf,
    /// Write indented JSON
    pub pretty_json: bool,
}

impl Default for StorageSettings {
    fn default() -> Self {
        let base = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
        Self {
            documents_dir: base.join("badgekit").join("documents"),
            pretty_json: true,
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Designer tunables
    pub designer: DesignerSettings,
    /// Document storage
    pub storage: StorageSettings,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Default config file location: `<config dir>/badgekit/config.toml`.
    pub fn default_path() -> SettingsResult<PathBuf> {
        let dir = dirs::config_dir().ok_or(ConfigError::NoConfigDirectory)?;
        Ok(dir.join("badgekit").join("config.toml"))
    }

    /// Loads the config at the default path, or defaults if it is missing or invalid.
    pub fn load_or_default() -> Self {
        let path = match Self::default_path() {
            Ok(path) => path,
            Err(e) => {
                tracing::warn!("Using default config: {}", e);
                return Self::default();
            }
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from_file(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Ignoring config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path)?;

        let config: Self = match extension(path) {
            Some("json") => serde_json::from_str(&content)?,
            Some("toml") => toml::from_str(&content)?,
            other => {
                return Err(
                    ConfigError::UnsupportedExtension(other.unwrap_or_default().to_string()).into(),
                )
            }
        };

        config.validate()?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match extension(path) {
            Some("json") => serde_json::to_string_pretty(self)?,
            Some("toml") => toml::to_string_pretty(self)?,
            other => {
                return Err(
                    ConfigError::UnsupportedExtension(other.unwrap_or_default().to_string()).into(),
                )
            }
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let d = &self.designer;
        check_positive("designer.dpi", d.dpi)?;
        check_positive("designer.snap_threshold_px", d.snap_threshold_px)?;
        check_positive("designer.nudge_step_px", d.nudge_step_px)?;
        check_positive("designer.nudge_step_large_px", d.nudge_step_large_px)?;
        check_positive("designer.min_element_size_px", d.min_element_size_px)?;

        if d.max_history == 0 {
            return Err(ConfigError::OutOfRange {
                key: "designer.max_history",
                value: "0".to_string(),
            });
        }

        if !d.paste_offset_px.is_finite() || d.paste_offset_px < 0.0 {
            return Err(ConfigError::OutOfRange {
                key: "designer.paste_offset_px",
                value: d.paste_offset_px.to_string(),
            });
        }

        Ok(())
    }
}

fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|ext| ext.to_str())
}

fn check_positive(key: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            key,
            value: value.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SettingsError;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.designer.max_history, 99);
        assert_eq!(config.designer.dpi, 300.0);
    }

    #[test]
    fn test_toml_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.designer.snap_threshold_px = 6.0;
        config.designer.default_format = FormatPreset::Small;
        config.save_to_file(&path).unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_json_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let mut config = Config::default();
        config.designer.max_history = 10;
        config.save_to_file(&path).unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert_eq!(loaded.designer.max_history, 10);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[designer]\nsnap_enabled = false\n").unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert!(!loaded.designer.snap_enabled);
        assert_eq!(loaded.designer.paste_offset_px, PASTE_OFFSET_PX);
    }

    #[test]
    fn test_rejects_unknown_extension() {
        let result = Config::default().save_to_file(Path::new("config.yaml"));
        assert!(matches!(
            result,
            Err(SettingsError::Invalid(ConfigError::UnsupportedExtension(_)))
        ));
    }

    #[test]
    fn test_validation_rejects_zero_values() {
        let mut config = Config::default();
        config.designer.max_history = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.designer.dpi = 0.0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.designer.paste_offset_px = -1.0;
        assert!(config.validate().is_err());
    }
}
