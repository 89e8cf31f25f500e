//! File I/O operations (save, load) for designer state.
//!
//! A failed save leaves the engine untouched: no history entry, no change
//! to the modified flag or document id. Failures are published as error
//! notifications.

use std::path::Path;

use badgekit_core::{Notification, PersistenceError};

use super::DesignerState;
use crate::interaction::GestureState;
use crate::persistence::{DocumentId, DocumentStore};
use crate::serialization::BadgeDocument;
use crate::variables::extract_variables;

impl DesignerState {
    /// Builds the persisted payload for the current document.
    pub fn to_document(&self) -> BadgeDocument {
        let mut document = BadgeDocument::new(&self.document_name, self.format.clone());
        if let Some(created) = self.created {
            document.metadata.created = created;
        }
        document.elements = self.elements.clone();
        document.background = self.background.clone();
        document.uploaded_images = self.images.clone();
        document.symmetry_pairs = self.symmetry.clone();
        document.refresh_variables();
        document
    }

    /// Template variable names used by text elements.
    pub fn variables(&self) -> Vec<String> {
        extract_variables(&self.elements)
    }

    /// Replaces the engine state with `document`.
    ///
    /// History restarts from the loaded state and new ids continue after
    /// the highest id in the document.
    pub fn load_document(&mut self, document: BadgeDocument) {
        let next_id = document.next_free_id();
        let mut symmetry = document.symmetry_pairs;
        let existing = document.elements.iter().map(|e| e.id).collect();
        symmetry.retain_existing(&existing);

        self.next_id = next_id;
        self.elements = document.elements;
        self.background = document.background;
        self.symmetry = symmetry;
        self.format = document.format;
        self.images = document.uploaded_images;
        self.document_name = document.metadata.name;
        self.created = Some(document.metadata.created);
        self.clipboard.clear();
        self.gesture = GestureState::Idle;
        self.selection.deselect_all();
        self.fit_view();
        self.reset_history();
        self.is_modified = false;

        tracing::info!(
            elements = self.elements.len(),
            pairs = self.symmetry.len(),
            "Opened badge document '{}'",
            self.document_name
        );
    }

    /// Saves through `store`, reusing the current document id if any.
    pub fn save_to_store(
        &mut self,
        store: &mut dyn DocumentStore,
    ) -> Result<DocumentId, PersistenceError> {
        let document = self.to_document();
        match store.save(&document, self.document_id.as_ref()) {
            Ok(id) => {
                self.document_id = Some(id.clone());
                self.created = Some(document.metadata.created);
                self.is_modified = false;
                self.notifications
                    .publish(Notification::success(format!("Saved '{}'", self.document_name)));
                Ok(id)
            }
            Err(e) => {
                tracing::error!("Failed to save badge document: {}", e);
                self.notifications
                    .publish(Notification::error(format!("Save failed: {}", e)));
                Err(e)
            }
        }
    }

    /// Loads document `id` from `store`. State is untouched on failure.
    pub fn load_from_store(
        &mut self,
        store: &dyn DocumentStore,
        id: &DocumentId,
    ) -> Result<(), PersistenceError> {
        match store.load(id) {
            Ok(document) => {
                self.load_document(document);
                self.document_id = Some(id.clone());
                Ok(())
            }
            Err(e) => {
                tracing::error!("Failed to load badge document {}: {}", id, e);
                self.notifications
                    .publish(Notification::error(format!("Could not open document: {}", e)));
                Err(e)
            }
        }
    }

    /// Save document to a standalone file.
    pub fn save_to_file(&mut self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let document = self.to_document();
        document.save_to_file(&path)?;

        self.created = Some(document.metadata.created);
        self.is_modified = false;
        tracing::info!("Saved badge document to {}", path.as_ref().display());
        Ok(())
    }

    /// Load document from a standalone file.
    pub fn load_from_file(&mut self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let document = BadgeDocument::load_from_file(&path)?;
        self.load_document(document);
        self.document_id = None;
        Ok(())
    }
}
