//! Document-level changes: format, background, new document.

use badgekit_core::BadgeFormat;

use super::DesignerState;
use crate::commands::CommandOutcome;
use crate::history::ActionType;
use crate::interaction::GestureState;
use crate::model::{ElementId, ImageId};
use crate::symmetry::SymmetryRegistry;

impl DesignerState {
    /// Switches the badge format.
    ///
    /// Elements are pulled back inside the new bounds and every clone is
    /// re-mirrored around the new canvas center, all in one commit.
    pub fn set_format(&mut self, format: BadgeFormat) -> CommandOutcome {
        if format == self.format {
            return CommandOutcome::unchanged();
        }
        self.cancel_gesture();

        tracing::info!("Badge format changed: {} -> {}", self.format, format);
        self.format = format;
        let (width, height) = self.canvas_size();

        let mut moved: Vec<ElementId> = Vec::new();
        for element in &mut self.elements {
            let x = element.x.clamp(0.0, (width - element.width).max(0.0));
            let y = element.y.clamp(0.0, (height - element.height).max(0.0));
            if x != element.x || y != element.y {
                element.x = x;
                element.y = y;
                moved.push(element.id);
            }
        }

        let parents: Vec<ElementId> = self.symmetry.iter().map(|p| p.parent_id).collect();
        let mut affected = self.sync_partners(&parents);
        for id in moved {
            if !affected.contains(&id) {
                affected.push(id);
            }
        }

        self.fit_view();
        self.commit(ActionType::FormatChanged);
        CommandOutcome::committed(affected)
    }

    /// Sets or clears the background image.
    pub fn set_background(&mut self, image: Option<ImageId>) -> CommandOutcome {
        self.cancel_gesture();
        if image == self.background {
            return CommandOutcome::unchanged();
        }
        if let Some(id) = &image {
            if !self.images.contains(id) {
                tracing::warn!(%id, "Background refers to an unknown image");
            }
        }
        self.background = image;
        self.commit(ActionType::BackgroundChanged);
        CommandOutcome::committed(Vec::new())
    }

    /// Discards the document and starts an empty one on `format`.
    pub fn new_document(&mut self, format: BadgeFormat) {
        self.elements.clear();
        self.background = None;
        self.symmetry = SymmetryRegistry::new();
        self.format = format;
        self.clipboard.clear();
        self.gesture = GestureState::Idle;
        self.selection.deselect_all();
        self.images = Default::default();
        self.next_id = 1;
        self.document_name = "Untitled badge".to_string();
        self.document_id = None;
        self.created = None;
        self.fit_view();
        self.reset_history();
        self.is_modified = false;
    }
}
