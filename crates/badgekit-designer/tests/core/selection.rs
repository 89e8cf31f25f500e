use std::collections::BTreeSet;

use badgekit_designer::selection_manager::element_at;
use badgekit_designer::{Bounds, Element, ElementKind, Point, SelectionManager};

fn text(id: u64, bounds: Bounds) -> Element {
    Element::new(
        id,
        ElementKind::Text {
            content: format!("Text {}", id),
        },
        bounds,
    )
}

fn elements() -> Vec<Element> {
    vec![
        text(1, Bounds::new(0.0, 0.0, 100.0, 50.0)),
        text(2, Bounds::new(50.0, 25.0, 100.0, 50.0)),
        text(3, Bounds::new(400.0, 400.0, 100.0, 50.0)),
    ]
}

#[test]
fn test_select_id_replaces_without_multi() {
    let mut manager = SelectionManager::new();
    manager.select_id(1, false);
    manager.select_id(2, false);

    assert_eq!(manager.selected_ids(), &[2]);
    assert_eq!(manager.selected_id(), Some(2));
}

#[test]
fn test_multi_select_toggles() {
    let mut manager = SelectionManager::new();
    manager.select_id(1, false);
    manager.select_id(2, true);
    assert_eq!(manager.selected_ids(), &[1, 2]);
    assert_eq!(manager.selected_id(), Some(2));

    manager.select_id(2, true);
    assert_eq!(manager.selected_ids(), &[1]);
    assert_eq!(manager.selected_id(), Some(1));
}

#[test]
fn test_select_at_picks_topmost() {
    let els = elements();
    let mut manager = SelectionManager::new();

    // Overlap of 1 and 2: the later element wins.
    assert_eq!(manager.select_at(&els, &Point::new(75.0, 40.0), false), Some(2));

    // Empty space clears.
    assert_eq!(manager.select_at(&els, &Point::new(300.0, 300.0), false), None);
    assert!(manager.is_empty());
}

#[test]
fn test_z_index_beats_insertion_order() {
    let mut els = elements();
    els[0].style.z_index = 5;
    assert_eq!(element_at(&els, &Point::new(75.0, 40.0)), Some(1));
}

#[test]
fn test_marquee_selects_intersecting() {
    let els = elements();
    let mut manager = SelectionManager::new();

    let hit = manager.select_in_rect(&els, &Bounds::new(90.0, 10.0, 20.0, 20.0), false);
    assert_eq!(hit, vec![1, 2]);
    assert_eq!(manager.len(), 2);
}

#[test]
fn test_marquee_touching_edge_does_not_select() {
    let els = elements();
    let mut manager = SelectionManager::new();

    let hit = manager.select_in_rect(&els, &Bounds::new(500.0, 450.0, 30.0, 30.0), false);
    assert!(hit.is_empty());
    assert!(manager.is_empty());
}

#[test]
fn test_additive_marquee_keeps_selection() {
    let els = elements();
    let mut manager = SelectionManager::new();
    manager.select_id(3, false);

    manager.select_in_rect(&els, &Bounds::new(-10.0, -10.0, 20.0, 20.0), true);
    assert!(manager.is_selected(3));
    assert!(manager.is_selected(1));
}

#[test]
fn test_select_all_and_retain_existing() {
    let els = elements();
    let mut manager = SelectionManager::new();
    manager.select_all(&els);
    assert_eq!(manager.selected_id(), Some(3));

    manager.retain_existing(&els[..2]);
    assert_eq!(manager.selected_ids(), &[1, 2]);
    assert_eq!(manager.selected_id(), Some(2));

    let removed: BTreeSet<u64> = [1].into_iter().collect();
    manager.remove(&removed);
    assert_eq!(manager.selected_ids(), &[2]);
}
