//! Engine-wide defaults.
//!
//! These are the values the designer falls back to when no configuration
//! overrides them. All lengths are badge-space pixels at [`crate::DEFAULT_DPI`].

/// Maximum number of snapshots retained by the undo/redo history.
pub const MAX_HISTORY: usize = 99;

/// Distance (badge px) within which a moving element snaps to a guide.
pub const SNAP_THRESHOLD_PX: f64 = 10.0;

/// Offset applied to pasted and duplicated elements.
pub const PASTE_OFFSET_PX: f64 = 20.0;

/// Arrow-key nudge step.
pub const NUDGE_STEP_PX: f64 = 1.0;

/// Arrow-key nudge step while the modifier is held.
pub const NUDGE_STEP_LARGE_PX: f64 = 10.0;

/// Smallest width or height an element can be resized to.
pub const MIN_ELEMENT_SIZE_PX: f64 = 10.0;

/// Fraction of the canvas width given to text containing a `{{variable}}`.
pub const VARIABLE_TEXT_WIDTH_FRACTION: f64 = 0.8;

/// Fallback text box when measurement is unavailable.
pub const DEFAULT_TEXT_WIDTH_PX: f64 = 400.0;
pub const DEFAULT_TEXT_HEIGHT_PX: f64 = 100.0;

/// Default text style values for new text elements.
pub const DEFAULT_FONT_FAMILY: &str = "Arial";
pub const DEFAULT_FONT_SIZE_PX: f64 = 72.0;
pub const DEFAULT_LINE_HEIGHT: f64 = 1.2;

/// Default edge length of a new QR code element.
pub const DEFAULT_QR_SIZE_PX: f64 = 400.0;

/// Default width of a new image element (height follows the image aspect).
pub const DEFAULT_IMAGE_WIDTH_PX: f64 = 500.0;

/// Maximum notifications kept by the notification center.
pub const NOTIFICATION_HISTORY: usize = 50;
