//! Rotation and transform-string helpers.
//!
//! Element transforms are CSS-style function lists (`scale(2) rotate(90deg)`).
//! Rotation lives in its own style field; the transform string always
//! mirrors it with exactly one trailing `rotate(...)` token while any other
//! transform functions survive untouched.

use regex::Regex;
use std::sync::OnceLock;

fn rotate_token() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"rotate\([^)]*\)").expect("invalid rotate regex"))
}

/// Normalizes an angle to `[0, 360)`.
pub fn normalize_degrees(degrees: f64) -> f64 {
    if !degrees.is_finite() {
        return 0.0;
    }
    let d = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if d >= 360.0 || d == 0.0 {
        0.0
    } else {
        d
    }
}

/// Replaces any `rotate(...)` in `existing` with `rotate(<degrees>deg)`.
///
/// Other transform functions are preserved in their original order.
/// Composing twice with the same rotation yields the same string.
pub fn compose_rotation(degrees: f64, existing: &str) -> String {
    let stripped = rotate_token().replace_all(existing, "");
    let rest = stripped.split_whitespace().collect::<Vec<_>>().join(" ");
    let rotate = format!("rotate({}deg)", format_degrees(degrees));
    if rest.is_empty() {
        rotate
    } else {
        format!("{rest} {rotate}")
    }
}

/// Rotation extracted from a transform string, if it has one.
pub fn parse_rotation(transform: &str) -> Option<f64> {
    let token = rotate_token().find(transform)?.as_str();
    let inner = token.strip_prefix("rotate(")?.strip_suffix(')')?.trim();
    let number = inner.strip_suffix("deg").unwrap_or(inner).trim();
    number.parse().ok()
}

fn format_degrees(degrees: f64) -> String {
    let rounded = (degrees * 1000.0).round() / 1000.0;
    if rounded == 0.0 {
        "0".to_string()
    } else {
        format!("{rounded}")
    }
}
