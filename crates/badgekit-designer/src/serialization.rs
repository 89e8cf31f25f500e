//! Serialization of badge documents.
//!
//! A document is the persisted payload handed to the persistence
//! collaborator: format, elements, background, uploaded images, symmetry
//! pairs and the derived variables list, stored as JSON.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

use badgekit_core::{BadgeFormat, DocumentError, PersistenceError};

use crate::images::ImageLibrary;
use crate::model::{Element, ElementId, ImageId};
use crate::symmetry::SymmetryRegistry;
use crate::variables::extract_variables;

/// Badge document format version
pub const DOCUMENT_FORMAT_VERSION: &str = "1.0";

/// Document metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub name: String,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
    #[serde(default)]
    pub description: String,
}

/// Complete persisted badge document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgeDocument {
    pub version: String,
    pub metadata: DocumentMetadata,
    pub format: BadgeFormat,
    #[serde(default)]
    pub elements: Vec<Element>,
    #[serde(default)]
    pub background: Option<ImageId>,
    #[serde(default)]
    pub uploaded_images: ImageLibrary,
    #[serde(default)]
    pub symmetry_pairs: SymmetryRegistry,
    /// Derived from text content on every save.
    #[serde(default)]
    pub variables: Vec<String>,
}

impl BadgeDocument {
    /// Creates an empty document on the given format.
    pub fn new(name: impl Into<String>, format: BadgeFormat) -> Self {
        let now = Utc::now();
        Self {
            version: DOCUMENT_FORMAT_VERSION.to_string(),
            metadata: DocumentMetadata {
                name: name.into(),
                created: now,
                modified: now,
                description: String::new(),
            },
            format,
            elements: Vec::new(),
            background: None,
            uploaded_images: ImageLibrary::new(),
            symmetry_pairs: SymmetryRegistry::new(),
            variables: Vec::new(),
        }
    }

    /// Recomputes the derived variables list from text elements.
    pub fn refresh_variables(&mut self) {
        self.variables = extract_variables(&self.elements);
    }

    /// Smallest id guaranteed not to collide with any element in the document.
    pub fn next_free_id(&self) -> ElementId {
        self.elements.iter().map(|e| e.id).max().map_or(1, |m| m + 1)
    }

    /// Checks the document before it is opened in the engine.
    pub fn validate(&self) -> std::result::Result<(), DocumentError> {
        let major = |v: &str| v.split('.').next().map(str::to_owned);
        if major(&self.version) != major(DOCUMENT_FORMAT_VERSION) {
            return Err(DocumentError::UnsupportedVersion {
                found: self.version.clone(),
                expected: DOCUMENT_FORMAT_VERSION.to_string(),
            });
        }

        let mut seen = BTreeSet::new();
        for element in &self.elements {
            if !seen.insert(element.id) {
                return Err(DocumentError::DuplicateElement { id: element.id });
            }
        }

        for pair in self.symmetry_pairs.iter() {
            if !seen.contains(&pair.parent_id) || !seen.contains(&pair.clone_id) {
                tracing::warn!(
                    parent = pair.parent_id,
                    clone = pair.clone_id,
                    "Symmetry pair references a missing element"
                );
            }
        }
        Ok(())
    }

    pub fn to_json(&self, pretty: bool) -> std::result::Result<String, PersistenceError> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }

    /// Parses and validates a document.
    pub fn from_json(json: &str) -> std::result::Result<Self, PersistenceError> {
        let document: BadgeDocument = serde_json::from_str(json)?;
        document.validate()?;
        Ok(document)
    }

    /// Save document to file
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let json =
            serde_json::to_string_pretty(self).context("Failed to serialize badge document")?;

        std::fs::write(path.as_ref(), json).context("Failed to write badge document")?;

        Ok(())
    }

    /// Load document from file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content =
            std::fs::read_to_string(path.as_ref()).context("Failed to read badge document")?;

        let document: BadgeDocument =
            serde_json::from_str(&content).context("Failed to parse badge document")?;
        document
            .validate()
            .with_context(|| format!("Rejected badge document {}", path.as_ref().display()))?;

        Ok(document)
    }
}

impl Default for BadgeDocument {
    fn default() -> Self {
        Self::new("Untitled badge", BadgeFormat::default())
    }
}
