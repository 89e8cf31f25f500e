use badgekit_core::{FormatPreset, PersistenceError};
use badgekit_designer::{
    BadgeDocument, Bounds, DocumentId, DocumentStore, Element, ElementKind, FileDocumentStore,
    MemoryDocumentStore,
};
use badgekit_settings::StorageSettings;
use tempfile::TempDir;

fn document(name: &str) -> BadgeDocument {
    let mut document = BadgeDocument::new(name, FormatPreset::Small.format());
    document.elements.push(Element::new(
        1,
        ElementKind::Text {
            content: "Hello {{name}}".to_string(),
        },
        Bounds::new(10.0, 20.0, 300.0, 80.0),
    ));
    document.refresh_variables();
    document
}

#[test]
fn test_file_store_save_load_list_delete() {
    let dir = TempDir::new().unwrap();
    let mut store = FileDocumentStore::new(dir.path().join("docs"));

    assert!(store.list().unwrap().is_empty());

    let doc = document("Speaker");
    let id = store.save(&doc, None).unwrap();
    assert_eq!(store.list().unwrap(), vec![id.clone()]);
    assert_eq!(store.load(&id).unwrap(), doc);

    // Saving under the same id overwrites.
    let renamed = document("Keynote speaker");
    assert_eq!(store.save(&renamed, Some(&id)).unwrap(), id);
    assert_eq!(store.list().unwrap().len(), 1);
    assert_eq!(store.load(&id).unwrap().metadata.name, "Keynote speaker");

    store.delete(&id).unwrap();
    assert!(matches!(
        store.load(&id),
        Err(PersistenceError::NotFound { .. })
    ));
    assert!(matches!(
        store.delete(&id),
        Err(PersistenceError::NotFound { .. })
    ));
}

#[test]
fn test_file_store_rejects_path_like_ids() {
    let dir = TempDir::new().unwrap();
    let mut store = FileDocumentStore::new(dir.path());

    let id = DocumentId::from("../escape");
    assert!(matches!(
        store.save(&document("x"), Some(&id)),
        Err(PersistenceError::Rejected { .. })
    ));
}

#[test]
fn test_file_store_from_settings() {
    let dir = TempDir::new().unwrap();
    let settings = StorageSettings {
        documents_dir: dir.path().to_path_buf(),
        pretty_json: false,
    };
    let mut store = FileDocumentStore::from_settings(&settings);
    assert_eq!(store.dir(), dir.path());

    let id = store.save(&document("Compact"), None).unwrap();
    let raw = std::fs::read_to_string(dir.path().join(format!("{}.json", id))).unwrap();
    assert!(!raw.contains('\n'));
}

#[test]
fn test_file_store_surfaces_invalid_documents() {
    let dir = TempDir::new().unwrap();
    let store = FileDocumentStore::new(dir.path());
    std::fs::write(dir.path().join("bad.json"), "[]").unwrap();

    assert!(matches!(
        store.load(&DocumentId::from("bad")),
        Err(PersistenceError::Serialization(_))
    ));
}

#[test]
fn test_memory_store_reject_and_recover() {
    let mut store = MemoryDocumentStore::new();
    store.set_reject(Some("quota exceeded".to_string()));

    let err = store.save(&document("A"), None).unwrap_err();
    assert!(err.to_string().contains("quota exceeded"));
    assert!(store.is_empty());

    store.set_reject(None);
    let id = store.save(&document("A"), None).unwrap();
    assert_eq!(store.len(), 1);
    assert_eq!(store.load(&id).unwrap().variables, vec!["name".to_string()]);
}
