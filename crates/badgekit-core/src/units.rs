//! Unit conversion utilities
//!
//! Badges are designed in millimeters and edited in badge-space pixels.
//! The conversion always uses a fixed print resolution ([`DEFAULT_DPI`]);
//! the DPI is never derived from the screen.

/// Print resolution of badge space, in dots per inch.
pub const DEFAULT_DPI: f64 = 300.0;

/// Millimeters per inch.
pub const MM_PER_INCH: f64 = 25.4;

/// Converts millimeters to whole badge pixels at [`DEFAULT_DPI`].
pub fn mm_to_px(mm: f64) -> f64 {
    mm_to_px_at(mm, DEFAULT_DPI)
}

/// Converts millimeters to whole pixels at the given resolution.
///
/// The result is rounded to the nearest pixel.
pub fn mm_to_px_at(mm: f64, dpi: f64) -> f64 {
    (mm * dpi / MM_PER_INCH).round()
}

/// Converts badge pixels back to millimeters at [`DEFAULT_DPI`].
pub fn px_to_mm(px: f64) -> f64 {
    px_to_mm_at(px, DEFAULT_DPI)
}

/// Converts pixels to millimeters at the given resolution (not rounded).
pub fn px_to_mm_at(px: f64, dpi: f64) -> f64 {
    px * MM_PER_INCH / dpi
}

/// Formats a pixel length as millimeters for display.
pub fn format_mm(px: f64, dpi: f64) -> String {
    format!("{:.1} mm", px_to_mm_at(px, dpi))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_large_badge_dimensions() {
        assert_eq!(mm_to_px(96.0), 1134.0);
        assert_eq!(mm_to_px(268.0), 3165.0);
    }

    #[test]
    fn test_one_inch_is_dpi_pixels() {
        assert_eq!(mm_to_px(25.4), 300.0);
        assert_eq!(mm_to_px_at(25.4, 150.0), 150.0);
    }

    #[test]
    fn test_px_to_mm_not_rounded() {
        let mm = px_to_mm(1.0);
        assert!((mm - 25.4 / 300.0).abs() < 1e-12);
    }

    #[test]
    fn test_round_trip_within_one_pixel() {
        for mm in [0.0, 1.0, 54.0, 85.6, 96.0, 134.0, 268.0] {
            let back = px_to_mm(mm_to_px(mm));
            assert!((back - mm).abs() <= MM_PER_INCH / DEFAULT_DPI);
        }
    }

    #[test]
    fn test_format_mm() {
        assert_eq!(format_mm(300.0, 300.0), "25.4 mm");
    }
}
