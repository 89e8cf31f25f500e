//! Text measurement for sizing text elements.
//!
//! Width comes from a [`TextMeasurer`]. Height is derived from font size,
//! line height and line count, so a font-size change never needs a
//! measurement. When no measurement is available the element falls back to
//! fixed default dimensions.

use fontdb::{Database, Family, Query, Stretch, Style, Weight};
use rusttype::{point as rt_point, Font, Scale};
use std::{
    collections::HashMap,
    fs,
    sync::{Arc, Mutex, OnceLock},
};

use badgekit_core::constants::{
    DEFAULT_TEXT_HEIGHT_PX, DEFAULT_TEXT_WIDTH_PX, VARIABLE_TEXT_WIDTH_FRACTION,
};

use crate::model::{ElementStyle, FontWeight};
use crate::variables::has_placeholder;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextSize {
    pub width: f64,
    pub height: f64,
}

impl TextSize {
    pub const DEFAULT: TextSize = TextSize {
        width: DEFAULT_TEXT_WIDTH_PX,
        height: DEFAULT_TEXT_HEIGHT_PX,
    };
}

/// Measures the rendered width of a single line of text.
pub trait TextMeasurer: Send + Sync {
    /// Returns `None` when the text cannot be measured (no usable font).
    fn line_width(&self, line: &str, style: &ElementStyle) -> Option<f64>;
}

/// Measures against installed system fonts.
#[derive(Debug, Default, Clone, Copy)]
pub struct FontMeasurer;

impl TextMeasurer for FontMeasurer {
    fn line_width(&self, line: &str, style: &ElementStyle) -> Option<f64> {
        let font = font_for(
            &style.font_family,
            style.font_weight == FontWeight::Bold,
            style.italic,
        )?;
        let scale = Scale::uniform(style.font_size as f32);
        let glyphs: Vec<_> = font.layout(line, scale, rt_point(0.0, 0.0)).collect();
        let advance = glyphs
            .last()
            .map(|g| g.position().x + g.unpositioned().h_metrics().advance_width)
            .unwrap_or(0.0) as f64;
        let spacing = style.letter_spacing * line.chars().count().saturating_sub(1) as f64;
        Some(advance + spacing)
    }
}

/// Measurer that is never able to measure. Every text gets fixed defaults.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableMeasurer;

impl TextMeasurer for UnavailableMeasurer {
    fn line_width(&self, _line: &str, _style: &ElementStyle) -> Option<f64> {
        None
    }
}

/// Monospace approximation: each char advances `em_fraction * font_size`.
#[derive(Debug, Clone, Copy)]
pub struct MonospaceMeasurer {
    pub em_fraction: f64,
}

impl Default for MonospaceMeasurer {
    fn default() -> Self {
        Self { em_fraction: 0.6 }
    }
}

impl TextMeasurer for MonospaceMeasurer {
    fn line_width(&self, line: &str, style: &ElementStyle) -> Option<f64> {
        let chars = line.chars().count() as f64;
        Some(
            chars * style.font_size * self.em_fraction
                + style.letter_spacing * (chars - 1.0).max(0.0),
        )
    }
}

/// Height of `content` for the given style.
pub fn text_height(content: &str, style: &ElementStyle) -> f64 {
    let lines = content.lines().count().max(1) as f64;
    lines * style.font_size * style.line_height
}

/// Width of the widest line, `None` if any line cannot be measured.
pub fn measure_width(
    measurer: &dyn TextMeasurer,
    content: &str,
    style: &ElementStyle,
) -> Option<f64> {
    let mut widest: f64 = 0.0;
    for line in content.lines() {
        widest = widest.max(measurer.line_width(line, style)?);
    }
    Some(widest.ceil())
}

/// Full size of a text element.
///
/// Placeholder text (`{{name}}`) takes a fixed fraction of the canvas
/// width because its rendered value is unknown at design time.
pub fn size_text(
    measurer: &dyn TextMeasurer,
    content: &str,
    style: &ElementStyle,
    canvas_width: f64,
) -> TextSize {
    let height = text_height(content, style);
    if has_placeholder(content) {
        return TextSize {
            width: (canvas_width * VARIABLE_TEXT_WIDTH_FRACTION).round(),
            height,
        };
    }
    match measure_width(measurer, content, style) {
        Some(width) if width > 0.0 => TextSize { width, height },
        Some(_) => TextSize {
            width: style.font_size,
            height,
        },
        None => {
            tracing::warn!(
                family = %style.font_family,
                "Text could not be measured, using default size"
            );
            TextSize::DEFAULT
        }
    }
}

#[derive(Clone, Eq, PartialEq, Hash)]
struct FontKey {
    family: String,
    bold: bool,
    italic: bool,
}

fn db() -> &'static Database {
    static DB: OnceLock<Database> = OnceLock::new();
    DB.get_or_init(|| {
        let mut db = Database::new();
        db.load_system_fonts();
        tracing::debug!(faces = db.len(), "Loaded system fonts");
        db
    })
}

fn font_for(family: &str, bold: bool, italic: bool) -> Option<Arc<Font<'static>>> {
    static CACHE: OnceLock<Mutex<HashMap<FontKey, Option<Arc<Font<'static>>>>>> = OnceLock::new();
    let cache = CACHE.get_or_init(|| Mutex::new(HashMap::new()));

    let key = FontKey {
        family: family.to_string(),
        bold,
        italic,
    };

    if let Some(hit) = cache.lock().unwrap_or_else(|p| p.into_inner()).get(&key) {
        return hit.clone();
    }

    let loaded = load_font_from_system(family, bold, italic).map(Arc::new);
    if loaded.is_none() {
        tracing::debug!(family, bold, italic, "No system font matched");
    }
    cache
        .lock()
        .unwrap_or_else(|p| p.into_inner())
        .insert(key, loaded.clone());
    loaded
}

fn load_font_from_system(family: &str, bold: bool, italic: bool) -> Option<Font<'static>> {
    let families: Vec<Family<'_>> = match family.trim() {
        "" | "sans-serif" => vec![Family::SansSerif],
        "serif" => vec![Family::Serif],
        "monospace" => vec![Family::Monospace],
        other => vec![Family::Name(other), Family::SansSerif],
    };

    let query = Query {
        families: &families,
        weight: if bold { Weight::BOLD } else { Weight::NORMAL },
        stretch: Stretch::Normal,
        style: if italic { Style::Italic } else { Style::Normal },
    };

    let id = db().query(&query)?;
    let face = db().face(id)?;

    match &face.source {
        fontdb::Source::File(path) | fontdb::Source::SharedFile(path, _) => {
            let bytes = fs::read(path).ok()?;
            Font::try_from_vec_and_index(bytes, face.index)
        }
        fontdb::Source::Binary(bytes) => {
            Font::try_from_vec_and_index(bytes.as_ref().as_ref().to_vec(), face.index)
        }
    }
}
