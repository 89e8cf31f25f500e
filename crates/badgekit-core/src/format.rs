//! Badge format presets.
//!
//! A badge document is laid out on exactly one physical format. The
//! presets are the only persisted enumeration the engine depends on.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DocumentError;
use crate::units::mm_to_px_at;

/// Named badge format presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FormatPreset {
    /// 96 x 268 mm fold-over badge
    #[default]
    Large,
    /// 96 x 134 mm single-sided badge
    Small,
}

impl FormatPreset {
    /// All presets, in display order.
    pub const ALL: [FormatPreset; 2] = [FormatPreset::Large, FormatPreset::Small];

    /// Returns the physical format for this preset.
    pub fn format(self) -> BadgeFormat {
        match self {
            Self::Large => BadgeFormat::new("LARGE", 96.0, 268.0),
            Self::Small => BadgeFormat::new("SMALL", 96.0, 134.0),
        }
    }
}

impl fmt::Display for FormatPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Large => write!(f, "large"),
            Self::Small => write!(f, "small"),
        }
    }
}

impl FromStr for FormatPreset {
    type Err = DocumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "large" => Ok(Self::Large),
            "small" => Ok(Self::Small),
            other => Err(DocumentError::UnknownFormat {
                name: other.to_string(),
            }),
        }
    }
}

/// Physical badge dimensions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BadgeFormat {
    pub name: String,
    pub width_mm: f64,
    pub height_mm: f64,
}

impl BadgeFormat {
    /// Creates a format from its physical size.
    pub fn new(name: impl Into<String>, width_mm: f64, height_mm: f64) -> Self {
        Self {
            name: name.into(),
            width_mm,
            height_mm,
        }
    }

    /// Badge-space size in whole pixels at the given DPI.
    pub fn pixel_size(&self, dpi: f64) -> (f64, f64) {
        (mm_to_px_at(self.width_mm, dpi), mm_to_px_at(self.height_mm, dpi))
    }

    /// Center of the badge in badge-space pixels.
    pub fn center(&self, dpi: f64) -> (f64, f64) {
        let (w, h) = self.pixel_size(dpi);
        (w / 2.0, h / 2.0)
    }

    /// Matches this format back to a preset, if it is one.
    pub fn preset(&self) -> Option<FormatPreset> {
        FormatPreset::ALL.into_iter().find(|p| {
            let f = p.format();
            f.width_mm == self.width_mm && f.height_mm == self.height_mm
        })
    }
}

impl Default for BadgeFormat {
    fn default() -> Self {
        FormatPreset::default().format()
    }
}

impl fmt::Display for BadgeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} x {} mm)", self.name, self.width_mm, self.height_mm)
    }
}
