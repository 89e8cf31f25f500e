//! Persistence collaborators for badge documents.
//!
//! The engine only knows the save/load contract. [`FileDocumentStore`]
//! keeps one JSON file per document in a directory;
//! [`MemoryDocumentStore`] keeps serialized documents in memory and can be
//! told to reject saves.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use badgekit_core::PersistenceError;
use badgekit_settings::StorageSettings;

use crate::serialization::BadgeDocument;

/// Identifier assigned by a store on first save.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(pub String);

impl DocumentId {
    pub fn new_v4() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DocumentId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Save/load contract of the persistence backend.
pub trait DocumentStore {
    /// Stores `document`, overwriting `id` when given. Returns the id.
    fn save(
        &mut self,
        document: &BadgeDocument,
        id: Option<&DocumentId>,
    ) -> Result<DocumentId, PersistenceError>;

    fn load(&self, id: &DocumentId) -> Result<BadgeDocument, PersistenceError>;

    fn list(&self) -> Result<Vec<DocumentId>, PersistenceError>;

    fn delete(&mut self, id: &DocumentId) -> Result<(), PersistenceError>;
}

/// One `<id>.json` file per document.
#[derive(Debug, Clone)]
pub struct FileDocumentStore {
    dir: PathBuf,
    pretty: bool,
}

impl FileDocumentStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            pretty: true,
        }
    }

    pub fn from_settings(settings: &StorageSettings) -> Self {
        Self {
            dir: settings.documents_dir.clone(),
            pretty: settings.pretty_json,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, id: &DocumentId) -> PathBuf {
        self.dir.join(format!("{}.json", id.as_str()))
    }

    fn check_id(id: &DocumentId) -> Result<(), PersistenceError> {
        let valid = !id.0.is_empty()
            && id
                .0
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if valid {
            Ok(())
        } else {
            Err(PersistenceError::Rejected {
                reason: format!("invalid document id {:?}", id.0),
            })
        }
    }
}

impl DocumentStore for FileDocumentStore {
    fn save(
        &mut self,
        document: &BadgeDocument,
        id: Option<&DocumentId>,
    ) -> Result<DocumentId, PersistenceError> {
        let id = id.cloned().unwrap_or_else(DocumentId::new_v4);
        Self::check_id(&id)?;
        fs::create_dir_all(&self.dir)?;

        let json = document.to_json(self.pretty)?;
        let path = self.path_for(&id);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &path)?;

        tracing::info!("Saved badge document {} to {}", id, path.display());
        Ok(id)
    }

    fn load(&self, id: &DocumentId) -> Result<BadgeDocument, PersistenceError> {
        Self::check_id(id)?;
        let path = self.path_for(id);
        let json = match fs::read_to_string(&path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(PersistenceError::NotFound { id: id.to_string() })
            }
            Err(e) => return Err(e.into()),
        };
        let document = BadgeDocument::from_json(&json)?;
        tracing::info!("Loaded badge document {} from {}", id, path.display());
        Ok(document)
    }

    fn list(&self) -> Result<Vec<DocumentId>, PersistenceError> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }
        let mut ids = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                ids.push(DocumentId::from(stem));
            }
        }
        ids.sort();
        Ok(ids)
    }

    fn delete(&mut self, id: &DocumentId) -> Result<(), PersistenceError> {
        Self::check_id(id)?;
        match fs::remove_file(self.path_for(id)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(PersistenceError::NotFound { id: id.to_string() })
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory store holding serialized documents.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocumentStore {
    documents: BTreeMap<DocumentId, String>,
    reject_reason: Option<String>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent save fail with `reason` (or succeed again with `None`).
    pub fn set_reject(&mut self, reason: Option<String>) {
        self.reject_reason = reason;
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl DocumentStore for MemoryDocumentStore {
    fn save(
        &mut self,
        document: &BadgeDocument,
        id: Option<&DocumentId>,
    ) -> Result<DocumentId, PersistenceError> {
        if let Some(reason) = &self.reject_reason {
            return Err(PersistenceError::Rejected {
                reason: reason.clone(),
            });
        }
        let id = id.cloned().unwrap_or_else(DocumentId::new_v4);
        self.documents.insert(id.clone(), document.to_json(false)?);
        Ok(id)
    }

    fn load(&self, id: &DocumentId) -> Result<BadgeDocument, PersistenceError> {
        let json = self
            .documents
            .get(id)
            .ok_or_else(|| PersistenceError::NotFound { id: id.to_string() })?;
        BadgeDocument::from_json(json)
    }

    fn list(&self) -> Result<Vec<DocumentId>, PersistenceError> {
        Ok(self.documents.keys().cloned().collect())
    }

    fn delete(&mut self, id: &DocumentId) -> Result<(), PersistenceError> {
        self.documents
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| PersistenceError::NotFound { id: id.to_string() })
    }
}
