//! Element operations (add, update, delete, duplicate, clipboard, nudge).

use std::collections::BTreeSet;

use badgekit_core::constants::{DEFAULT_IMAGE_WIDTH_PX, DEFAULT_QR_SIZE_PX};

use super::DesignerState;
use crate::commands::CommandOutcome;
use crate::history::ActionType;
use crate::model::{Bounds, Element, ElementId, ElementKind, ElementPatch, PatchEffect, Point};
use crate::selection_manager::element_at;
use crate::symmetry::{cascade_deletion, propagate, PairRole};
use crate::text_metrics::{size_text, text_height, TextMeasurer};

impl DesignerState {
    /// Adds an element centered on `center` (the visible center by default).
    ///
    /// The new element becomes the selection.
    pub fn add_element(&mut self, kind: ElementKind, center: Option<Point>) -> ElementId {
        self.cancel_gesture();
        let (canvas_width, canvas_height) = self.canvas_size();
        let center =
            center.unwrap_or_else(|| self.viewport.visible_center(canvas_width, canvas_height));

        let id = self.alloc_id();
        let mut element = Element::new(id, kind, Bounds::default());
        let (width, height, aspect) = self.initial_size(&element);
        element.width = width.max(self.min_size);
        element.height = height.max(self.min_size);
        if let Some(ratio) = aspect {
            element.maintain_aspect_ratio = true;
            element.aspect_ratio = Some(ratio);
        }
        element.set_center(center);

        tracing::debug!(id, kind = %element.element_type(), "Added element");
        self.elements.push(element);
        self.selection.set([id]);
        self.commit(ActionType::ElementAdded);
        id
    }

    fn initial_size(&self, element: &Element) -> (f64, f64, Option<f64>) {
        match &element.kind {
            ElementKind::Text { content } => {
                let size = size_text(
                    self.measurer.as_ref(),
                    content,
                    &element.style,
                    self.canvas_size().0,
                );
                (size.width, size.height, None)
            }
            ElementKind::QrCode { .. } => (DEFAULT_QR_SIZE_PX, DEFAULT_QR_SIZE_PX, Some(1.0)),
            ElementKind::Image { image_id } => {
                let ratio = self
                    .images
                    .get(image_id)
                    .and_then(|asset| asset.aspect_ratio())
                    .unwrap_or(1.0);
                (DEFAULT_IMAGE_WIDTH_PX, DEFAULT_IMAGE_WIDTH_PX / ratio, Some(ratio))
            }
        }
    }

    /// Applies a partial update to one element and re-mirrors its partner.
    ///
    /// With `skip_history` the change is applied without a commit; the
    /// caller commits once when the gesture ends.
    pub fn update_element(
        &mut self,
        id: ElementId,
        patch: ElementPatch,
        skip_history: bool,
    ) -> CommandOutcome {
        self.cancel_gesture();
        self.finish_updates(&[(id, patch)], skip_history, ActionType::ElementUpdated)
    }

    /// Applies several updates in one pass with at most one commit.
    pub fn batch_update_elements(
        &mut self,
        updates: &[(ElementId, ElementPatch)],
        skip_history: bool,
    ) -> CommandOutcome {
        self.cancel_gesture();
        self.finish_updates(updates, skip_history, ActionType::ElementsUpdated)
    }

    pub(crate) fn finish_updates(
        &mut self,
        updates: &[(ElementId, ElementPatch)],
        skip_history: bool,
        action: ActionType,
    ) -> CommandOutcome {
        let affected = self.apply_updates(updates);
        if affected.is_empty() {
            return CommandOutcome::unchanged();
        }
        if skip_history {
            self.is_modified = true;
            CommandOutcome::uncommitted(affected)
        } else {
            self.commit(action);
            CommandOutcome::committed(affected)
        }
    }

    /// Patches elements, re-measures text and re-mirrors partners. No commit.
    pub(crate) fn apply_updates(
        &mut self,
        updates: &[(ElementId, ElementPatch)],
    ) -> Vec<ElementId> {
        let canvas_width = self.canvas_size().0;
        let min_size = self.min_size;
        let mut changed: Vec<ElementId> = Vec::new();

        for (id, patch) in updates {
            let Some(idx) = self.position_of(*id) else {
                tracing::debug!(id, "Update for unknown element ignored");
                continue;
            };
            let element = &mut self.elements[idx];
            let effect = element.apply_patch(patch, min_size);
            if element.is_text() {
                remeasure_text(
                    element,
                    effect,
                    patch,
                    self.measurer.as_ref(),
                    canvas_width,
                    min_size,
                );
            }
            if !changed.contains(id) {
                changed.push(*id);
            }
        }

        self.sync_partners(&changed)
    }

    /// Re-mirrors the partner of every changed element.
    ///
    /// When both halves of a pair changed, the parent drives. Returns the
    /// changed ids followed by the partners that were rewritten.
    pub(crate) fn sync_partners(&mut self, changed: &[ElementId]) -> Vec<ElementId> {
        let center = self.canvas_center();
        let mut affected = changed.to_vec();

        for &id in changed {
            let Some(partner) = self.symmetry.partner_of(id) else {
                continue;
            };
            if partner.role == PairRole::Clone && changed.contains(&partner.id) {
                continue;
            }
            let Some(source) = self.element(id).cloned() else {
                continue;
            };
            let Some(partner_idx) = self.position_of(partner.id) else {
                tracing::warn!(id, partner = partner.id, "Symmetry partner missing, skipping");
                continue;
            };
            if let Some(mirrored) = propagate(id, &source, &self.symmetry, center) {
                self.elements[partner_idx] = mirrored;
                if !affected.contains(&partner.id) {
                    affected.push(partner.id);
                }
            }
        }

        affected
    }

    /// Deletes one element (and its symmetry partner).
    pub fn delete_element(&mut self, id: ElementId) -> CommandOutcome {
        self.delete_elements(&[id])
    }

    /// Deletes elements, cascading to symmetry partners, with one commit.
    pub fn delete_elements(&mut self, ids: &[ElementId]) -> CommandOutcome {
        self.cancel_gesture();
        let existing: Vec<ElementId> = ids
            .iter()
            .copied()
            .filter(|&id| self.position_of(id).is_some())
            .collect();
        if existing.is_empty() {
            return CommandOutcome::unchanged();
        }

        let (doomed, pairs) = cascade_deletion(&existing, &self.symmetry);
        self.elements.retain(|e| !doomed.contains(&e.id));
        self.symmetry = pairs;
        self.selection.remove(&doomed);

        tracing::debug!(count = doomed.len(), "Deleted elements");
        self.commit(ActionType::ElementsDeleted);
        CommandOutcome::committed(doomed.into_iter().collect())
    }

    /// Duplicates one element; see [`DesignerState::duplicate_elements`].
    pub fn duplicate_element(&mut self, id: ElementId) -> Option<ElementId> {
        self.duplicate_elements(&[id]).into_iter().next()
    }

    /// Copies elements with an offset and fresh ids.
    ///
    /// Copies are never paired, even when the source is. The copies become
    /// the selection.
    pub fn duplicate_elements(&mut self, ids: &[ElementId]) -> Vec<ElementId> {
        self.cancel_gesture();
        let sources = self.collect_in_order(ids);
        self.insert_copies(sources, ActionType::ElementsDuplicated)
    }

    /// Copies the selected elements to the clipboard. Not undo-tracked.
    pub fn copy_selection(&mut self) -> usize {
        let ids = self.selected_ids();
        self.clipboard = self.collect_in_order(&ids);
        tracing::debug!(count = self.clipboard.len(), "Copied to clipboard");
        self.clipboard.len()
    }

    /// Pastes the clipboard with an offset and fresh ids.
    ///
    /// Every paste lands at the same offset from the copied elements.
    pub fn paste(&mut self) -> Vec<ElementId> {
        self.cancel_gesture();
        let sources = self.clipboard.clone();
        self.insert_copies(sources, ActionType::ElementsPasted)
    }

    fn collect_in_order(&self, ids: &[ElementId]) -> Vec<Element> {
        let wanted: BTreeSet<ElementId> = ids.iter().copied().collect();
        self.elements
            .iter()
            .filter(|e| wanted.contains(&e.id))
            .cloned()
            .collect()
    }

    fn insert_copies(&mut self, sources: Vec<Element>, action: ActionType) -> Vec<ElementId> {
        if sources.is_empty() {
            return Vec::new();
        }

        let offset = self.paste_offset;
        let mut new_ids = Vec::with_capacity(sources.len());
        for mut element in sources {
            element.id = self.alloc_id();
            element.translate(offset, offset);
            new_ids.push(element.id);
            self.elements.push(element);
        }

        self.selection.set(new_ids.iter().copied());
        self.commit(action);
        new_ids
    }

    /// Moves the selection by `(dx, dy)` with one commit.
    pub fn nudge_selection(&mut self, dx: f64, dy: f64) -> CommandOutcome {
        self.cancel_gesture();
        if dx == 0.0 && dy == 0.0 {
            return CommandOutcome::unchanged();
        }
        let updates: Vec<(ElementId, ElementPatch)> = self
            .selection
            .selected_ids()
            .iter()
            .filter_map(|&id| self.element(id))
            .map(|e| (e.id, ElementPatch::position(e.x + dx, e.y + dy)))
            .collect();
        self.finish_updates(&updates, false, ActionType::ElementsNudged)
    }

    pub fn select_element(&mut self, id: ElementId, multi: bool) {
        if self.position_of(id).is_some() {
            self.selection.select_id(id, multi);
        }
    }

    pub fn select_all(&mut self) {
        self.selection.select_all(&self.elements);
    }

    pub fn deselect_all(&mut self) {
        self.selection.deselect_all();
    }

    /// Topmost element under a badge-space point.
    pub fn element_at(&self, point: &Point) -> Option<ElementId> {
        element_at(&self.elements, point)
    }
}

/// Re-sizes a text element after a patch.
///
/// A font-size change only recomputes height. A family or content change
/// remeasures both dimensions. Dimensions set explicitly by the patch win.
fn remeasure_text(
    element: &mut Element,
    effect: PatchEffect,
    patch: &ElementPatch,
    measurer: &dyn TextMeasurer,
    canvas_width: f64,
    min_size: f64,
) {
    let Some(content) = element.content().map(str::to_owned) else {
        return;
    };

    if effect.font_family || effect.content {
        let size = size_text(measurer, &content, &element.style, canvas_width);
        if patch.width.is_none() {
            element.width = size.width.max(min_size);
        }
        if patch.height.is_none() {
            element.height = size.height.max(min_size);
        }
    } else if effect.font_size && patch.height.is_none() {
        element.height = text_height(&content, &element.style).max(min_size);
    }
}
