//! Pointer gestures: drag, resize-handle drag and marquee selection.
//!
//! Pointer-move frames update elements without touching history. Releasing
//! the pointer commits once; cancelling restores the pre-gesture elements.

use std::collections::BTreeSet;

use super::DesignerState;
use crate::commands::CommandOutcome;
use crate::history::ActionType;
use crate::interaction::{
    DragGesture, GestureState, MarqueeGesture, PointerModifiers, ResizeGesture, ResizeHandle,
};
use crate::model::{Bounds, Element, ElementId, ElementPatch, Point};
use crate::snapping::{SnapGuide, SnapResult, SnapTargets};

/// Handle grab radius in screen pixels.
const HANDLE_HIT_RADIUS: f64 = 8.0;

impl DesignerState {
    /// Starts a gesture at a badge-space point.
    ///
    /// A resize handle of the primary selection starts a resize, an element
    /// starts a drag and empty canvas starts a marquee. Ignored while
    /// another gesture is active.
    pub fn pointer_down(&mut self, point: Point, modifiers: PointerModifiers) -> bool {
        if !self.gesture.is_idle() {
            return false;
        }

        if let Some(primary) = self.selection.selected_id().and_then(|id| self.element(id)) {
            let radius = HANDLE_HIT_RADIUS / self.viewport.zoom();
            if let Some(handle) = ResizeHandle::hit_test(&primary.bounds(), &point, radius) {
                let id = primary.id;
                return self.begin_resize(id, handle, point);
            }
        }

        match self.element_at(&point) {
            Some(id) => {
                if modifiers.shift {
                    self.selection.select_id(id, true);
                    if !self.selection.is_selected(id) {
                        return false;
                    }
                } else if !self.selection.is_selected(id) {
                    self.selection.select_id(id, false);
                }
                self.begin_drag(point)
            }
            None => {
                self.begin_marquee(point, modifiers.shift);
                true
            }
        }
    }

    /// Starts dragging the current selection.
    pub fn begin_drag(&mut self, origin: Point) -> bool {
        if !self.gesture.is_idle() {
            return false;
        }
        let moving: Vec<ElementId> = self
            .selection
            .selected_ids()
            .iter()
            .copied()
            .filter(|&id| self.element(id).is_some())
            .collect();
        let Some(start_bounds) = moving
            .iter()
            .filter_map(|&id| self.element(id))
            .map(Element::bounds)
            .reduce(|a, b| a.union(&b))
        else {
            return false;
        };

        let mut excluded: BTreeSet<ElementId> = moving.iter().copied().collect();
        for &id in &moving {
            if let Some(partner) = self.symmetry.partner_of(id) {
                excluded.insert(partner.id);
            }
        }
        let targets = SnapTargets::collect(self.canvas_bounds(), &self.elements, &excluded);

        tracing::debug!(count = moving.len(), "Drag started");
        self.gesture = GestureState::Dragging(DragGesture {
            origin,
            moving,
            before: self.elements.clone(),
            was_modified: self.is_modified,
            targets,
            start_bounds,
            delta: (0.0, 0.0),
            guides: Vec::new(),
            target_ids: Vec::new(),
        });
        true
    }

    /// Starts dragging `handle` of element `id`.
    pub fn begin_resize(&mut self, id: ElementId, handle: ResizeHandle, origin: Point) -> bool {
        if !self.gesture.is_idle() {
            return false;
        }
        let Some(start) = self.element(id).map(Element::bounds) else {
            return false;
        };
        tracing::debug!(id, %handle, "Resize started");
        self.gesture = GestureState::Resizing(ResizeGesture {
            id,
            handle,
            origin,
            start,
            before: self.elements.clone(),
            was_modified: self.is_modified,
        });
        true
    }

    /// Starts a marquee selection rectangle.
    pub fn begin_marquee(&mut self, origin: Point, additive: bool) -> bool {
        if !self.gesture.is_idle() {
            return false;
        }
        self.gesture = GestureState::Marquee(MarqueeGesture {
            origin,
            current: origin,
            additive,
        });
        true
    }

    /// Advances the active gesture to `point`.
    pub fn pointer_move(&mut self, point: Point, modifiers: PointerModifiers) {
        if let GestureState::Marquee(marquee) = &mut self.gesture {
            marquee.current = point;
            return;
        }
        match self.gesture {
            GestureState::Dragging(_) => {
                self.drag_to(point, modifiers);
            }
            GestureState::Resizing(_) => self.resize_to(point, modifiers),
            _ => {}
        }
    }

    /// Ends the active gesture at `point`, committing drag/resize once.
    pub fn pointer_up(&mut self, point: Point, modifiers: PointerModifiers) -> CommandOutcome {
        self.pointer_move(point, modifiers);

        match std::mem::take(&mut self.gesture) {
            GestureState::Idle => CommandOutcome::unchanged(),
            GestureState::Dragging(drag) => {
                self.finish_edit(&drag.before, ActionType::ElementsMoved)
            }
            GestureState::Resizing(resize) => {
                self.finish_edit(&resize.before, ActionType::ElementResized)
            }
            GestureState::Marquee(marquee) => {
                let hit = self
                    .selection
                    .select_in_rect(&self.elements, &marquee.rect(), marquee.additive);
                CommandOutcome::uncommitted(hit)
            }
        }
    }

    /// Aborts the active gesture, restoring the pre-gesture elements and
    /// modified flag.
    ///
    /// Element-mutating operations call this before they run.
    pub fn cancel_gesture(&mut self) -> bool {
        match std::mem::take(&mut self.gesture) {
            GestureState::Idle => false,
            GestureState::Dragging(DragGesture {
                before,
                was_modified,
                ..
            })
            | GestureState::Resizing(ResizeGesture {
                before,
                was_modified,
                ..
            }) => {
                self.elements = before;
                self.is_modified = was_modified;
                tracing::debug!("Gesture cancelled");
                true
            }
            GestureState::Marquee(_) => true,
        }
    }

    /// Guides the current drag is aligned with.
    pub fn active_guides(&self) -> &[SnapGuide] {
        match &self.gesture {
            GestureState::Dragging(drag) => &drag.guides,
            _ => &[],
        }
    }

    /// Elements that produced the current drag's snap.
    pub fn snap_target_ids(&self) -> &[ElementId] {
        match &self.gesture {
            GestureState::Dragging(drag) => &drag.target_ids,
            _ => &[],
        }
    }

    /// Current marquee rectangle, if a marquee is active.
    pub fn marquee_rect(&self) -> Option<Bounds> {
        match &self.gesture {
            GestureState::Marquee(marquee) => Some(marquee.rect()),
            _ => None,
        }
    }

    fn drag_to(&mut self, point: Point, modifiers: PointerModifiers) -> Option<SnapResult> {
        let GestureState::Dragging(drag) = &self.gesture else {
            return None;
        };

        let proposed = drag
            .start_bounds
            .translated(point.x - drag.origin.x, point.y - drag.origin.y);
        let snap = self.snapper.snap_to(&drag.targets, proposed, modifiers.alt);
        let delta = (snap.x - drag.start_bounds.x, snap.y - drag.start_bounds.y);

        // Positions come from the pre-drag state plus the total delta.
        let updates: Vec<(ElementId, ElementPatch)> = drag
            .moving
            .iter()
            .filter_map(|id| drag.before.iter().find(|e| e.id == *id))
            .map(|e| (e.id, ElementPatch::position(e.x + delta.0, e.y + delta.1)))
            .collect();

        if !self.apply_updates(&updates).is_empty() {
            self.is_modified = true;
        }

        if let GestureState::Dragging(drag) = &mut self.gesture {
            drag.delta = delta;
            drag.guides = snap.guides.clone();
            drag.target_ids = snap.target_ids.clone();
        }
        Some(snap)
    }

    fn resize_to(&mut self, point: Point, modifiers: PointerModifiers) {
        let GestureState::Resizing(resize) = &self.gesture else {
            return;
        };

        let locked = resize
            .before
            .iter()
            .find(|e| e.id == resize.id)
            .and_then(Element::locked_aspect_ratio);
        let aspect = locked.or_else(|| {
            (modifiers.shift && resize.start.height > 0.0)
                .then(|| resize.start.width / resize.start.height)
        });
        let bounds = resize.handle.apply(
            &resize.start,
            point.x - resize.origin.x,
            point.y - resize.origin.y,
            aspect,
            self.min_size,
        );
        let id = resize.id;

        if !self.apply_updates(&[(id, ElementPatch::bounds(bounds))]).is_empty() {
            self.is_modified = true;
        }
    }

    /// Commits if anything differs from `before`.
    fn finish_edit(&mut self, before: &[Element], action: ActionType) -> CommandOutcome {
        let changed: Vec<ElementId> = self
            .elements
            .iter()
            .filter(|e| before.iter().find(|b| b.id == e.id) != Some(e))
            .map(|e| e.id)
            .collect();
        if changed.is_empty() {
            return CommandOutcome::unchanged();
        }
        self.commit(action);
        CommandOutcome::committed(changed)
    }
}
