//! Symmetry pair operations.

use super::DesignerState;
use crate::commands::CommandOutcome;
use crate::history::ActionType;
use crate::model::ElementId;
use crate::symmetry::{break_symmetry, check_invariant, create_symmetry, SymmetryViolation};

/// Tolerance (badge px / degrees) used when checking the mirror invariant.
const MIRROR_TOLERANCE: f64 = 1e-6;

impl DesignerState {
    /// Creates a mirrored clone for every listed element not already paired.
    ///
    /// Commits once if any clone was created.
    pub fn create_symmetry(&mut self, ids: &[ElementId]) -> CommandOutcome {
        self.cancel_gesture();
        let center = self.canvas_center();
        let next_id = &mut self.next_id;
        let (elements, pairs) = create_symmetry(ids, &self.elements, &self.symmetry, center, || {
            let id = *next_id;
            *next_id += 1;
            id
        });

        let created: Vec<ElementId> = elements[self.elements.len()..]
            .iter()
            .map(|e| e.id)
            .collect();
        if created.is_empty() {
            return CommandOutcome::unchanged();
        }

        self.elements = elements;
        self.symmetry = pairs;
        self.commit(ActionType::SymmetryCreated);
        CommandOutcome::committed(created)
    }

    /// Unpairs every pair a listed element belongs to. Elements are kept.
    pub fn break_symmetry(&mut self, ids: &[ElementId]) -> CommandOutcome {
        self.cancel_gesture();
        let pairs = break_symmetry(ids, &self.symmetry);
        if pairs == self.symmetry {
            return CommandOutcome::unchanged();
        }

        let affected: Vec<ElementId> = self
            .symmetry
            .iter()
            .filter(|p| pairs.clone_of(p.parent_id).is_none())
            .flat_map(|p| [p.parent_id, p.clone_id])
            .collect();
        self.symmetry = pairs;
        self.commit(ActionType::SymmetryBroken);
        CommandOutcome::committed(affected)
    }

    /// Pairs whose clone is not the exact mirror of its parent.
    pub fn check_symmetry(&self) -> Vec<SymmetryViolation> {
        check_invariant(&self.elements, &self.symmetry, self.canvas_center(), MIRROR_TOLERANCE)
    }
}
