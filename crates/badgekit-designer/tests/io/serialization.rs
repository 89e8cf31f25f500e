use std::io::Cursor;
use std::sync::Arc;

use badgekit_core::{DocumentError, NotificationCenter, PersistenceError};
use badgekit_designer::text_metrics::MonospaceMeasurer;
use badgekit_designer::{BadgeDocument, DesignerState, ElementKind, Point};
use tempfile::TempDir;

fn engine() -> DesignerState {
    DesignerState::new()
        .with_measurer(Arc::new(MonospaceMeasurer::default()))
        .with_notifications(NotificationCenter::new())
}

fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbaImage::new(width, height);
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png).unwrap();
    out.into_inner()
}

fn sample_state() -> DesignerState {
    let mut state = engine();
    let name = state.add_element(
        ElementKind::Text {
            content: "Hello {{first_name}}".to_string(),
        },
        Some(Point::new(567.0, 400.0)),
    );
    state.create_symmetry(&[name]);
    state.add_element(
        ElementKind::Text {
            content: "{{company}} / {{first_name}}".to_string(),
        },
        Some(Point::new(567.0, 900.0)),
    );
    state
}

#[test]
fn test_document_json_shape() {
    let state = sample_state();
    let json = state.to_document().to_json(false).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["version"], "1.0");
    assert_eq!(value["elements"][0]["type"], "text");
    assert_eq!(value["elements"][0]["content"], "Hello {{first_name}}");
    assert_eq!(value["elements"][0]["style"]["transform"], "rotate(0deg)");
    assert_eq!(
        value["symmetryPairs"],
        serde_json::json!([{ "parentId": 1, "cloneId": 2 }])
    );
    assert_eq!(value["variables"], serde_json::json!(["first_name", "company"]));
    assert!(value["uploadedImages"].is_object());
    assert!(value["background"].is_null());
}

#[test]
fn test_image_element_references_library() {
    let mut state = engine();
    let image = state
        .images
        .upload("data:image/png;base64,iVBORw0KGgo=", "logo.png", &png_bytes(4, 2));
    let id = state.add_element(
        ElementKind::Image {
            image_id: image.clone(),
        },
        Some(Point::new(567.0, 400.0)),
    );

    let element = state.element(id).unwrap();
    assert_eq!((element.width, element.height), (500.0, 250.0));
    assert!(element.maintain_aspect_ratio);

    let value: serde_json::Value =
        serde_json::from_str(&state.to_document().to_json(false).unwrap()).unwrap();
    assert_eq!(value["elements"][0]["type"], "image");
    assert_eq!(value["elements"][0]["imageId"], image.as_str());
    assert_eq!(
        value["uploadedImages"][image.as_str()]["dataURI"],
        "data:image/png;base64,iVBORw0KGgo="
    );
    assert_eq!(value["uploadedImages"][image.as_str()]["width"], 4);
}

#[test]
fn test_json_round_trip() {
    let document = sample_state().to_document();
    let json = document.to_json(true).unwrap();
    let loaded = BadgeDocument::from_json(&json).unwrap();
    assert_eq!(loaded, document);
}

#[test]
fn test_unsupported_version_is_rejected() {
    let mut document = sample_state().to_document();
    document.version = "2.0".to_string();
    let json = document.to_json(false).unwrap();

    let err = BadgeDocument::from_json(&json).unwrap_err();
    assert!(matches!(
        err,
        PersistenceError::Invalid(DocumentError::UnsupportedVersion { .. })
    ));
}

#[test]
fn test_duplicate_element_ids_are_rejected() {
    let mut document = sample_state().to_document();
    let copy = document.elements[0].clone();
    document.elements.push(copy);
    let json = document.to_json(false).unwrap();

    let err = BadgeDocument::from_json(&json).unwrap_err();
    assert!(matches!(
        err,
        PersistenceError::Invalid(DocumentError::DuplicateElement { id: 1 })
    ));
}

#[test]
fn test_malformed_symmetry_is_rejected() {
    let mut value: serde_json::Value =
        serde_json::from_str(&sample_state().to_document().to_json(false).unwrap()).unwrap();
    value["symmetryPairs"] = serde_json::json!([
        { "parentId": 1, "cloneId": 2 },
        { "parentId": 3, "cloneId": 2 }
    ]);

    let err = BadgeDocument::from_json(&value.to_string()).unwrap_err();
    assert!(matches!(err, PersistenceError::Serialization(_)));
}

#[test]
fn test_file_round_trip_restores_engine() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("badge.json");

    let mut state = sample_state();
    state.save_to_file(&path).unwrap();
    assert!(!state.is_modified);

    let mut loaded = engine();
    loaded.load_from_file(&path).unwrap();
    assert_eq!(loaded.elements(), state.elements());
    assert_eq!(loaded.symmetry(), state.symmetry());
    assert_eq!(loaded.variables(), vec!["first_name", "company"]);
    assert!(loaded.check_symmetry().is_empty());
    assert!(!loaded.can_undo());
}

#[test]
fn test_load_garbage_file_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{ not json").unwrap();

    let mut state = engine();
    let err = state.load_from_file(&path).unwrap_err();
    assert!(err.to_string().contains("Failed to parse badge document"));
    assert_eq!(state.element_count(), 0);
}

#[test]
fn test_orphan_pairs_are_dropped_on_load() {
    let mut document = sample_state().to_document();
    document.elements.retain(|e| e.id != 2);

    let mut state = engine();
    state.load_document(document);
    assert!(state.symmetry().is_empty());
    assert_eq!(state.element_count(), 2);
}

#[test]
fn test_import_image_file_probes_size() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("sponsor.png");
    std::fs::write(&path, png_bytes(6, 3)).unwrap();

    let mut state = engine();
    let id = state.images.import_file(&path).unwrap();
    let asset = state.images.get(&id).unwrap();
    assert_eq!(asset.filename, "sponsor.png");
    assert_eq!((asset.width, asset.height), (Some(6), Some(3)));
    assert!(asset.data_uri.starts_with("file://"));

    let logo = state.add_element(ElementKind::Image { image_id: id }, None);
    let element = state.element(logo).unwrap();
    assert!((element.width / element.height - 2.0).abs() < 1e-9);

    assert!(state
        .images
        .import_file(&dir.path().join("missing.png"))
        .is_err());
    assert_eq!(state.images.len(), 1);
}
