use serde::{Deserialize, Serialize};

use badgekit_core::constants::{DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE_PX, DEFAULT_LINE_HEIGHT};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum TextDecoration {
    #[default]
    None,
    Underline,
    LineThrough,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    #[default]
    Center,
    Right,
}

/// Visual style of an element.
///
/// Text fields are present on every element so that style patches merge
/// uniformly regardless of element type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ElementStyle {
    pub font_family: String,
    pub font_size: f64,
    pub color: String,
    pub font_weight: FontWeight,
    pub italic: bool,
    pub text_decoration: TextDecoration,
    pub text_align: TextAlign,
    pub line_height: f64,
    pub letter_spacing: f64,
    /// Degrees, normalized to `[0, 360)`.
    pub rotation: f64,
    /// CSS-style transform list; always carries the current `rotate(...)`.
    pub transform: String,
    pub opacity: f64,
    pub z_index: i32,
}

impl Default for ElementStyle {
    fn default() -> Self {
        Self {
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            font_size: DEFAULT_FONT_SIZE_PX,
            color: "#000000".to_string(),
            font_weight: FontWeight::Normal,
            italic: false,
            text_decoration: TextDecoration::None,
            text_align: TextAlign::Center,
            line_height: DEFAULT_LINE_HEIGHT,
            letter_spacing: 0.0,
            rotation: 0.0,
            transform: "rotate(0deg)".to_string(),
            opacity: 1.0,
            z_index: 0,
        }
    }
}

/// Shallow patch over [`ElementStyle`]: only `Some` fields are written.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StylePatch {
    pub font_family: Option<String>,
    pub font_size: Option<f64>,
    pub color: Option<String>,
    pub font_weight: Option<FontWeight>,
    pub italic: Option<bool>,
    pub text_decoration: Option<TextDecoration>,
    pub text_align: Option<TextAlign>,
    pub line_height: Option<f64>,
    pub letter_spacing: Option<f64>,
    pub rotation: Option<f64>,
    pub transform: Option<String>,
    pub opacity: Option<f64>,
    pub z_index: Option<i32>,
}

impl StylePatch {
    pub fn rotation(degrees: f64) -> Self {
        Self {
            rotation: Some(degrees),
            ..Self::default()
        }
    }

    pub fn font_size(size: f64) -> Self {
        Self {
            font_size: Some(size),
            ..Self::default()
        }
    }

    pub fn font_family(family: impl Into<String>) -> Self {
        Self {
            font_family: Some(family.into()),
            ..Self::default()
        }
    }

    pub fn color(color: impl Into<String>) -> Self {
        Self {
            color: Some(color.into()),
            ..Self::default()
        }
    }

    /// Writes every set field into `style`, leaving the rest untouched.
    pub fn apply_to(&self, style: &mut ElementStyle) {
        if let Some(v) = &self.font_family {
            style.font_family = v.clone();
        }
        if let Some(v) = self.font_size {
            style.font_size = v;
        }
        if let Some(v) = &self.color {
            style.color = v.clone();
        }
        if let Some(v) = self.font_weight {
            style.font_weight = v;
        }
        if let Some(v) = self.italic {
            style.italic = v;
        }
        if let Some(v) = self.text_decoration {
            style.text_decoration = v;
        }
        if let Some(v) = self.text_align {
            style.text_align = v;
        }
        if let Some(v) = self.line_height {
            style.line_height = v;
        }
        if let Some(v) = self.letter_spacing {
            style.letter_spacing = v;
        }
        if let Some(v) = self.rotation {
            style.rotation = v;
        }
        if let Some(v) = &self.transform {
            style.transform = v.clone();
        }
        if let Some(v) = self.opacity {
            style.opacity = v.clamp(0.0, 1.0);
        }
        if let Some(v) = self.z_index {
            style.z_index = v;
        }
    }
}
