use badgekit_designer::symmetry::{
    break_symmetry, cascade_deletion, check_invariant, create_symmetry, mirror_element, propagate,
    PairRole, SymmetryRegistry,
};
use badgekit_designer::{Bounds, Element, ElementKind, Point};

fn canvas_center() -> Point {
    // LARGE at 300 dpi: 1134 x 3165
    Point::new(567.0, 1582.5)
}

fn text(id: u64, bounds: Bounds) -> Element {
    Element::new(
        id,
        ElementKind::Text {
            content: "Jane Doe".to_string(),
        },
        bounds,
    )
}

fn counter(start: u64) -> impl FnMut() -> u64 {
    let mut next = start;
    move || {
        let id = next;
        next += 1;
        id
    }
}

#[test]
fn test_create_symmetry_reflects_through_center() {
    let parent = text(1, Bounds::new(100.0, 200.0, 300.0, 80.0));
    let (elements, pairs) = create_symmetry(
        &[1],
        &[parent.clone()],
        &SymmetryRegistry::new(),
        canvas_center(),
        counter(2),
    );

    assert_eq!(elements.len(), 2);
    let clone = &elements[1];
    assert_eq!(clone.id, 2);
    assert_eq!(clone.center(), Point::new(1134.0 - 250.0, 3165.0 - 240.0));
    assert_eq!((clone.width, clone.height), (parent.width, parent.height));
    assert_eq!(clone.rotation(), 180.0);
    assert_eq!(clone.style.transform, "rotate(180deg)");
    assert_eq!(clone.content(), parent.content());
    assert_eq!(pairs.clone_of(1), Some(2));
}

#[test]
fn test_create_symmetry_skips_paired_elements() {
    let parent = text(1, Bounds::new(100.0, 200.0, 300.0, 80.0));
    let (elements, pairs) = create_symmetry(
        &[1],
        &[parent],
        &SymmetryRegistry::new(),
        canvas_center(),
        counter(2),
    );

    // Neither the parent nor the clone gets a second clone.
    let (again, pairs_again) =
        create_symmetry(&[1, 2], &elements, &pairs, canvas_center(), counter(3));
    assert_eq!(again.len(), 2);
    assert_eq!(pairs_again, pairs);
}

#[test]
fn test_create_symmetry_pairs_each_selected_element() {
    let a = text(1, Bounds::new(10.0, 10.0, 100.0, 50.0));
    let b = text(2, Bounds::new(500.0, 900.0, 100.0, 50.0));
    let (elements, pairs) = create_symmetry(
        &[1, 2],
        &[a, b],
        &SymmetryRegistry::new(),
        canvas_center(),
        counter(3),
    );
    assert_eq!(elements.len(), 4);
    assert_eq!(pairs.len(), 2);
    assert!(check_invariant(&elements, &pairs, canvas_center(), 1e-9).is_empty());
}

#[test]
fn test_mirror_keeps_other_transforms() {
    let mut parent = text(1, Bounds::new(100.0, 200.0, 300.0, 80.0));
    parent.style.transform = "scale(-1, 1) rotate(0deg)".to_string();
    let clone = mirror_element(&parent, 2, canvas_center(), PairRole::Parent);
    assert_eq!(clone.style.transform, "scale(-1, 1) rotate(180deg)");
}

#[test]
fn test_propagate_from_parent_and_from_clone() {
    let mut pairs = SymmetryRegistry::new();
    pairs.insert(1, 2);

    let mut parent = text(1, Bounds::new(100.0, 200.0, 300.0, 80.0));
    parent.set_rotation(30.0);
    let clone = propagate(1, &parent, &pairs, canvas_center()).unwrap();
    assert_eq!(clone.id, 2);
    assert_eq!(clone.rotation(), 210.0);

    let mut moved_clone = clone.clone();
    moved_clone.translate(10.0, -20.0);
    moved_clone.set_rotation(200.0);
    let new_parent = propagate(2, &moved_clone, &pairs, canvas_center()).unwrap();
    assert_eq!(new_parent.id, 1);
    assert_eq!(new_parent.rotation(), 20.0);
    assert_eq!(new_parent.center(), Point::new(250.0 - 10.0, 240.0 + 20.0));

    assert!(propagate(9, &parent, &pairs, canvas_center()).is_none());
}

#[test]
fn test_break_symmetry_by_either_half() {
    let mut pairs = SymmetryRegistry::new();
    pairs.insert(1, 2);
    pairs.insert(3, 4);

    let broken = break_symmetry(&[4], &pairs);
    assert_eq!(broken.len(), 1);
    assert_eq!(broken.clone_of(1), Some(2));
    assert!(!broken.is_paired(3));

    let broken = break_symmetry(&[1, 3], &pairs);
    assert!(broken.is_empty());
}

#[test]
fn test_cascade_deletion_from_clone() {
    let mut pairs = SymmetryRegistry::new();
    pairs.insert(1, 2);

    let (doomed, remaining) = cascade_deletion(&[2], &pairs);
    assert!(doomed.contains(&1));
    assert!(doomed.contains(&2));
    assert!(remaining.is_empty());

    let (doomed, remaining) = cascade_deletion(&[5], &pairs);
    assert_eq!(doomed.len(), 1);
    assert_eq!(remaining, pairs);
}

#[test]
fn test_check_invariant_reports_drift() {
    let parent = text(1, Bounds::new(100.0, 200.0, 300.0, 80.0));
    let mut clone = mirror_element(&parent, 2, canvas_center(), PairRole::Parent);
    clone.translate(5.0, 0.0);
    let mut pairs = SymmetryRegistry::new();
    pairs.insert(1, 2);

    let violations = check_invariant(&[parent.clone(), clone], &pairs, canvas_center(), 1e-6);
    assert_eq!(violations.len(), 1);

    let violations = check_invariant(&[parent], &pairs, canvas_center(), 1e-6);
    assert_eq!(violations[0].reason, "orphaned pair");
}
