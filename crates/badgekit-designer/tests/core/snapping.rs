use std::collections::BTreeSet;

use badgekit_designer::snapping::SnapTargets;
use badgekit_designer::{Axis, Bounds, Element, ElementKind, GuideKind, Snapper};

fn canvas() -> Bounds {
    Bounds::new(0.0, 0.0, 1134.0, 3165.0)
}

fn qr(id: u64, bounds: Bounds) -> Element {
    Element::new(
        id,
        ElementKind::QrCode {
            content: "https://example.com".to_string(),
        },
        bounds,
    )
}

#[test]
fn test_snaps_to_canvas_center() {
    let snapper = Snapper::new(10.0);
    let result = snapper.snap(
        Bounds::new(512.0, 2000.0, 100.0, 60.0),
        canvas(),
        &[],
        &BTreeSet::new(),
        false,
    );

    assert!(result.snapped_x);
    assert!(!result.snapped_y);
    assert_eq!(result.x, 517.0);
    assert_eq!(result.y, 2000.0);
    assert!(result
        .guides
        .iter()
        .any(|g| g.axis == Axis::X && g.kind == GuideKind::CanvasCenter && g.position == 567.0));
    assert!(result.target_ids.is_empty());
}

#[test]
fn test_snaps_to_element_edge() {
    let other = qr(7, Bounds::new(300.0, 1000.0, 100.0, 50.0));
    let snapper = Snapper::new(10.0);
    let result = snapper.snap(
        Bounds::new(296.0, 2000.0, 60.0, 60.0),
        canvas(),
        &[other],
        &BTreeSet::new(),
        false,
    );

    assert_eq!(result.x, 300.0);
    let guide = result
        .guides
        .iter()
        .find(|g| g.axis == Axis::X)
        .expect("x guide");
    assert_eq!(guide.kind, GuideKind::ElementEdge);
    assert_eq!(guide.source, Some(7));
    assert_eq!(result.target_ids, vec![7]);
}

#[test]
fn test_adjacency_between_opposite_edges() {
    let other = qr(7, Bounds::new(300.0, 1000.0, 100.0, 50.0));
    let snapper = Snapper::new(10.0);
    let result = snapper.snap(
        Bounds::new(404.0, 2000.0, 60.0, 60.0),
        canvas(),
        &[other],
        &BTreeSet::new(),
        false,
    );

    assert_eq!(result.x, 400.0);
    assert!(result
        .guides
        .iter()
        .any(|g| g.kind == GuideKind::Adjacency && g.position == 400.0));
}

#[test]
fn test_excluded_elements_are_not_targets() {
    let other = qr(7, Bounds::new(300.0, 1000.0, 100.0, 50.0));
    let excluded: BTreeSet<u64> = [7].into_iter().collect();
    let result = Snapper::new(10.0).snap(
        Bounds::new(296.0, 2000.0, 60.0, 60.0),
        canvas(),
        &[other],
        &excluded,
        false,
    );

    assert!(!result.snapped_x);
    assert_eq!(result.x, 296.0);
    assert!(result.guides.is_empty());
}

#[test]
fn test_out_of_threshold_is_unchanged() {
    let result = Snapper::new(10.0).snap(
        Bounds::new(200.0, 2000.0, 60.0, 60.0),
        canvas(),
        &[],
        &BTreeSet::new(),
        false,
    );
    assert!(!result.snapped_x && !result.snapped_y);
    assert_eq!((result.x, result.y), (200.0, 2000.0));
}

#[test]
fn test_disabled_and_override_pass_through() {
    let proposed = Bounds::new(5.0, 6.0, 60.0, 60.0);

    let disabled = Snapper::new(10.0).with_enabled(false);
    let result = disabled.snap(proposed, canvas(), &[], &BTreeSet::new(), false);
    assert_eq!((result.x, result.y), (5.0, 6.0));

    let result = Snapper::new(10.0).snap(proposed, canvas(), &[], &BTreeSet::new(), true);
    assert_eq!((result.x, result.y), (5.0, 6.0));
    assert!(result.guides.is_empty());
}

#[test]
fn test_snapping_is_idempotent() {
    let elements = vec![
        qr(1, Bounds::new(300.0, 1000.0, 100.0, 50.0)),
        qr(2, Bounds::new(700.0, 400.0, 80.0, 80.0)),
    ];
    let targets = SnapTargets::collect(canvas(), &elements, &BTreeSet::new());
    let snapper = Snapper::new(10.0);

    let first = snapper.snap_to(&targets, Bounds::new(694.0, 993.0, 60.0, 60.0), false);
    let second = snapper.snap_to(&targets, Bounds::new(first.x, first.y, 60.0, 60.0), false);
    assert_eq!((first.x, first.y), (second.x, second.y));
}
