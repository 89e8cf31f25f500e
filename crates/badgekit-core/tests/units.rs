use badgekit_core::{mm_to_px, mm_to_px_at, px_to_mm, FormatPreset, DEFAULT_DPI, MM_PER_INCH};
use proptest::prelude::*;

#[test]
fn test_presets_at_default_dpi() {
    assert_eq!(FormatPreset::Large.format().pixel_size(DEFAULT_DPI), (1134.0, 3165.0));
    assert_eq!(FormatPreset::Small.format().pixel_size(DEFAULT_DPI), (1134.0, 1583.0));
}

#[test]
fn test_preset_names_parse() {
    assert_eq!("LARGE".parse::<FormatPreset>().unwrap(), FormatPreset::Large);
    assert_eq!(" small ".parse::<FormatPreset>().unwrap(), FormatPreset::Small);
    assert!("a4".parse::<FormatPreset>().is_err());
}

proptest! {
    #[test]
    fn mm_px_round_trip_within_half_pixel(mm in 0.0..1000.0f64) {
        let back = px_to_mm(mm_to_px(mm));
        prop_assert!((back - mm).abs() <= MM_PER_INCH / DEFAULT_DPI / 2.0 + 1e-9);
    }

    #[test]
    fn whole_pixels_round_trip_exactly(px in 0u32..10_000) {
        prop_assert_eq!(mm_to_px(px_to_mm(px as f64)), px as f64);
    }

    #[test]
    fn conversion_is_monotonic(a in 0.0..500.0f64, b in 0.0..500.0f64, dpi in 72.0..1200.0f64) {
        if a <= b {
            prop_assert!(mm_to_px_at(a, dpi) <= mm_to_px_at(b, dpi));
        }
    }
}
