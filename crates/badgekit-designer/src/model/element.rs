use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Bounds, ElementId, ElementStyle, ImageId, Point, StylePatch};
use crate::transform::{compose_rotation, normalize_degrees};

/// Element type discriminant, used by the add command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    Text,
    QrCode,
    Image,
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::QrCode => write!(f, "qrcode"),
            Self::Image => write!(f, "image"),
        }
    }
}

/// Type-specific payload of an element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ElementKind {
    Text {
        content: String,
    },
    #[serde(rename = "qrcode")]
    QrCode {
        content: String,
    },
    Image {
        #[serde(rename = "imageId")]
        image_id: ImageId,
    },
}

impl ElementKind {
    pub fn element_type(&self) -> ElementType {
        match self {
            Self::Text { .. } => ElementType::Text,
            Self::QrCode { .. } => ElementType::QrCode,
            Self::Image { .. } => ElementType::Image,
        }
    }
}

/// A placeable badge element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    pub id: ElementId,
    #[serde(flatten)]
    pub kind: ElementKind,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub style: ElementStyle,
    #[serde(default)]
    pub maintain_aspect_ratio: bool,
    #[serde(default)]
    pub aspect_ratio: Option<f64>,
}

/// What an [`ElementPatch`] actually changed, so callers can re-measure text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PatchEffect {
    pub geometry: bool,
    pub font_size: bool,
    pub font_family: bool,
    pub content: bool,
    pub style: bool,
}

/// Partial update of an element. Unset fields are left as they are.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ElementPatch {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub content: Option<String>,
    pub image_id: Option<ImageId>,
    pub style: Option<StylePatch>,
    pub maintain_aspect_ratio: Option<bool>,
}

impl ElementPatch {
    pub fn position(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Self::default()
        }
    }

    pub fn bounds(bounds: Bounds) -> Self {
        Self {
            x: Some(bounds.x),
            y: Some(bounds.y),
            width: Some(bounds.width),
            height: Some(bounds.height),
            ..Self::default()
        }
    }

    pub fn style(style: StylePatch) -> Self {
        Self {
            style: Some(style),
            ..Self::default()
        }
    }

    pub fn content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }
}

impl Element {
    pub fn new(id: ElementId, kind: ElementKind, bounds: Bounds) -> Self {
        let maintain_aspect_ratio = matches!(kind, ElementKind::QrCode { .. });
        Self {
            id,
            kind,
            x: bounds.x,
            y: bounds.y,
            width: bounds.width,
            height: bounds.height,
            style: ElementStyle::default(),
            maintain_aspect_ratio,
            aspect_ratio: maintain_aspect_ratio.then_some(1.0),
        }
    }

    pub fn element_type(&self) -> ElementType {
        self.kind.element_type()
    }

    pub fn is_text(&self) -> bool {
        matches!(self.kind, ElementKind::Text { .. })
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.x, self.y, self.width, self.height)
    }

    pub fn center(&self) -> Point {
        self.bounds().center()
    }

    /// Moves the element so its center lands on `center`, keeping its size.
    pub fn set_center(&mut self, center: Point) {
        self.x = center.x - self.width / 2.0;
        self.y = center.y - self.height / 2.0;
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.x += dx;
        self.y += dy;
    }

    pub fn rotation(&self) -> f64 {
        self.style.rotation
    }

    /// Sets the rotation and re-composes the transform, keeping other transform functions.
    pub fn set_rotation(&mut self, degrees: f64) {
        self.style.rotation = normalize_degrees(degrees);
        self.style.transform = compose_rotation(self.style.rotation, &self.style.transform);
    }

    /// Text or QR payload.
    pub fn content(&self) -> Option<&str> {
        match &self.kind {
            ElementKind::Text { content } | ElementKind::QrCode { content } => Some(content),
            ElementKind::Image { .. } => None,
        }
    }

    pub fn image_id(&self) -> Option<&ImageId> {
        match &self.kind {
            ElementKind::Image { image_id } => Some(image_id),
            _ => None,
        }
    }

    /// Aspect ratio (width / height) to hold during resize, if any.
    pub fn locked_aspect_ratio(&self) -> Option<f64> {
        if matches!(self.kind, ElementKind::QrCode { .. }) {
            return Some(1.0);
        }
        if !self.maintain_aspect_ratio {
            return None;
        }
        self.aspect_ratio.or_else(|| {
            (self.height > 0.0).then(|| self.width / self.height)
        })
    }

    /// Applies a patch in place. Width and height are clamped to `min_size`.
    pub fn apply_patch(&mut self, patch: &ElementPatch, min_size: f64) -> PatchEffect {
        let mut effect = PatchEffect::default();

        if let Some(x) = patch.x {
            effect.geometry |= x != self.x;
            self.x = x;
        }
        if let Some(y) = patch.y {
            effect.geometry |= y != self.y;
            self.y = y;
        }
        if let Some(w) = patch.width {
            let w = w.max(min_size);
            effect.geometry |= w != self.width;
            self.width = w;
        }
        if let Some(h) = patch.height {
            let h = h.max(min_size);
            effect.geometry |= h != self.height;
            self.height = h;
        }

        if let Some(content) = &patch.content {
            match &mut self.kind {
                ElementKind::Text { content: c } | ElementKind::QrCode { content: c } => {
                    effect.content = *c != *content;
                    *c = content.clone();
                }
                ElementKind::Image { .. } => {
                    tracing::warn!(id = self.id, "Ignoring content patch on image element");
                }
            }
        }

        if let (Some(new_id), ElementKind::Image { image_id }) = (&patch.image_id, &mut self.kind) {
            *image_id = new_id.clone();
        }

        if let Some(style) = &patch.style {
            let before = self.style.clone();
            style.apply_to(&mut self.style);
            if style.rotation.is_some() || style.transform.is_some() {
                self.set_rotation(self.style.rotation);
            }
            effect.font_size = before.font_size != self.style.font_size;
            effect.font_family = before.font_family != self.style.font_family;
            effect.style = before != self.style;
        }

        if let Some(keep) = patch.maintain_aspect_ratio {
            self.maintain_aspect_ratio = keep;
            self.aspect_ratio = keep.then(|| self.width / self.height);
        }

        effect
    }
}
