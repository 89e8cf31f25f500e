use badgekit_designer::interaction::MarqueeGesture;
use badgekit_designer::{Bounds, GestureState, Point, PointerModifiers, ResizeHandle};

#[test]
fn test_handle_positions() {
    let b = Bounds::new(10.0, 20.0, 100.0, 40.0);
    assert_eq!(ResizeHandle::NW.position(&b), Point::new(10.0, 20.0));
    assert_eq!(ResizeHandle::SE.position(&b), Point::new(110.0, 60.0));
    assert_eq!(ResizeHandle::N.position(&b), Point::new(60.0, 20.0));
    assert_eq!(ResizeHandle::W.position(&b), Point::new(10.0, 40.0));
}

#[test]
fn test_handle_hit_test_prefers_nearest() {
    let b = Bounds::new(0.0, 0.0, 10.0, 10.0);
    // Within radius of both NE (10,0) and E (10,5), nearer to E.
    let hit = ResizeHandle::hit_test(&b, &Point::new(10.0, 3.0), 4.0);
    assert_eq!(hit, Some(ResizeHandle::E));
    assert_eq!(ResizeHandle::hit_test(&b, &Point::new(50.0, 50.0), 4.0), None);
}

#[test]
fn test_west_handle_anchors_right_edge() {
    let start = Bounds::new(100.0, 100.0, 200.0, 80.0);
    let out = ResizeHandle::W.apply(&start, -30.0, 999.0, None, 10.0);
    assert_eq!(out, Bounds::new(70.0, 100.0, 230.0, 80.0));
}

#[test]
fn test_corner_with_aspect_uses_dominant_axis() {
    let start = Bounds::new(0.0, 0.0, 100.0, 100.0);
    let out = ResizeHandle::NE.apply(&start, 10.0, -40.0, Some(1.0), 10.0);
    assert_eq!(out.width, 140.0);
    assert_eq!(out.height, 140.0);
    assert_eq!(out.x, 0.0);
    assert_eq!(out.bottom(), 100.0);
}

#[test]
fn test_modifiers() {
    assert!(!PointerModifiers::NONE.shift);
    assert!(PointerModifiers::shift().shift);
    assert!(PointerModifiers::alt().alt);
}

#[test]
fn test_marquee_rect_is_normalized() {
    let marquee = MarqueeGesture {
        origin: Point::new(50.0, 80.0),
        current: Point::new(10.0, 20.0),
        additive: false,
    };
    assert_eq!(marquee.rect(), Bounds::new(10.0, 20.0, 40.0, 60.0));
}

#[test]
fn test_gesture_default_is_idle() {
    let state = GestureState::default();
    assert!(state.is_idle());
    assert_eq!(state.name(), "idle");
}
