use badgekit_designer::viewport::{screen_to_badge, MAX_ZOOM, MIN_ZOOM};
use badgekit_designer::{Bounds, Point, Viewport};

#[test]
fn test_screen_to_badge_scales_by_rendered_size() {
    // Badge rendered at half size, offset by (100, 50).
    let rendered = Bounds::new(100.0, 50.0, 567.0, 1582.5);
    let p = screen_to_badge(Point::new(383.5, 841.25), &rendered, 1134.0, 3165.0);
    assert_eq!(p, Point::new(567.0, 1582.5));

    let origin = screen_to_badge(Point::new(100.0, 50.0), &rendered, 1134.0, 3165.0);
    assert_eq!(origin, Point::new(0.0, 0.0));
}

#[test]
fn test_degenerate_rendered_rect() {
    let rendered = Bounds::new(0.0, 0.0, 0.0, 10.0);
    assert_eq!(
        screen_to_badge(Point::new(5.0, 5.0), &rendered, 100.0, 100.0),
        Point::new(0.0, 0.0)
    );
}

#[test]
fn test_zoom_limits() {
    let mut viewport = Viewport::new(1200.0, 800.0);
    viewport.set_zoom(MAX_ZOOM);
    assert_eq!(viewport.zoom(), 1.0);
    viewport.set_zoom(MIN_ZOOM);
    assert_eq!(viewport.zoom(), 1.0);
    viewport.set_zoom(2.5);
    assert_eq!(viewport.zoom(), 2.5);
}

#[test]
fn test_round_trip_through_viewport() {
    let mut viewport = Viewport::new(1200.0, 800.0);
    viewport.set_zoom(0.25);
    viewport.set_pan(40.0, 12.0);

    let badge = Point::new(300.0, 900.0);
    let screen = viewport.badge_to_screen(badge);
    let back = viewport.screen_to_badge(screen, 1134.0, 3165.0);
    assert!((back.x - badge.x).abs() < 1e-9);
    assert!((back.y - badge.y).abs() < 1e-9);
}

#[test]
fn test_fit_badge_centers_the_badge() {
    let mut viewport = Viewport::new(1200.0, 800.0);
    viewport.fit_badge(1134.0, 3165.0, 0.05);

    let center = viewport.visible_center(1134.0, 3165.0);
    assert!((center.x - 567.0).abs() < 1e-6);
    assert!((center.y - 1582.5).abs() < 1e-6);

    let rect = viewport.badge_rect(1134.0, 3165.0);
    assert!(rect.height <= 800.0 * 0.9 + 1e-9);
}

#[test]
fn test_zoom_to_point_keeps_point_fixed() {
    let mut viewport = Viewport::new(1200.0, 800.0);
    viewport.set_pan(10.0, 20.0);
    let anchor = Point::new(200.0, 300.0);
    let before = viewport.badge_to_screen(anchor);

    viewport.zoom_in_at(&anchor);
    let after = viewport.badge_to_screen(anchor);

    assert!((viewport.zoom() - 1.2).abs() < 1e-12);
    assert!((before.x - after.x).abs() < 1e-9);
    assert!((before.y - after.y).abs() < 1e-9);
}

#[test]
fn test_zoom_steps_and_pan() {
    let mut viewport = Viewport::new(1200.0, 800.0);
    viewport.zoom_in();
    assert!((viewport.zoom() - 1.2).abs() < 1e-12);
    viewport.zoom_out();
    viewport.zoom_out();
    assert!((viewport.zoom() - 1.0 / 1.2).abs() < 1e-12);

    viewport.set_pan(10.0, 20.0);
    viewport.pan_by(-5.0, 7.5);
    assert_eq!((viewport.pan_x(), viewport.pan_y()), (5.0, 27.5));

    let anchor = Point::new(50.0, 80.0);
    let before = viewport.badge_to_screen(anchor);
    viewport.zoom_out_at(&anchor);
    let after = viewport.badge_to_screen(anchor);
    assert!((before.x - after.x).abs() < 1e-9);
    assert!((before.y - after.y).abs() < 1e-9);
}

#[test]
fn test_container_resize_moves_visible_center() {
    let mut viewport = Viewport::new(1200.0, 800.0);
    viewport.set_canvas_size(600.0, 400.0);
    assert_eq!((viewport.canvas_width(), viewport.canvas_height()), (600.0, 400.0));

    viewport.fit_badge(1134.0, 3165.0, 0.05);
    let center = viewport.visible_center(1134.0, 3165.0);
    assert!((center.x - 567.0).abs() < 1e-6);
    assert!((center.y - 1582.5).abs() < 1e-6);
    assert!(viewport.badge_rect(1134.0, 3165.0).height <= 400.0 * 0.9 + 1e-9);
}
