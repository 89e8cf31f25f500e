//! Commit, undo/redo and snapshot restore.

use super::DesignerState;
use crate::history::{ActionType, HistoryAction, HistoryState};
use crate::interaction::GestureState;
use crate::model::ElementId;

impl DesignerState {
    /// Commits the current state as one history entry.
    pub(crate) fn commit(&mut self, action_type: ActionType) {
        let snapshot = self.snapshot();
        self.history.commit(snapshot, HistoryAction::simple(action_type));
        self.is_modified = true;
    }

    /// Drops all history and records the current state as the baseline.
    pub(crate) fn reset_history(&mut self) {
        let snapshot = self.snapshot();
        self.history.reset(snapshot);
    }

    /// Undo last change. Returns `false` at the oldest retained entry.
    pub fn undo(&mut self) -> bool {
        self.cancel_gesture();
        match self.history.undo() {
            Some(state) => {
                self.restore(state);
                true
            }
            None => false,
        }
    }

    /// Redo last undone change. Returns `false` at the tail.
    pub fn redo(&mut self) -> bool {
        self.cancel_gesture();
        match self.history.redo() {
            Some(state) => {
                self.restore(state);
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Applies a snapshot and drops selected ids that no longer exist.
    fn restore(&mut self, state: HistoryState) {
        self.symmetry = state.registry();
        self.elements = state.elements;
        self.background = state.background;
        if let Some(format) = state.format {
            if format != self.format {
                self.format = format;
                self.fit_view();
            }
        }
        self.selection.retain_existing(&self.elements);
        self.gesture = GestureState::Idle;
        self.is_modified = true;
    }

    /// Ids present before or after a restore, for dispatch outcomes.
    pub(crate) fn ids_touched_by(&self, before: &[ElementId]) -> Vec<ElementId> {
        let mut ids: Vec<ElementId> = before.to_vec();
        for e in &self.elements {
            if !ids.contains(&e.id) {
                ids.push(e.id);
            }
        }
        ids
    }
}
