//! Undo/redo history of immutable document snapshots.
//!
//! The history is an index-addressed list of [`HistoryState`] values capped
//! at a maximum length. Committing while the index is not at the tail drops
//! the redoable future first; committing past the cap drops the oldest
//! entry. Undo and redo only move the index and hand back a deep copy of
//! the snapshot they land on.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

use badgekit_core::BadgeFormat;

use crate::model::{Element, ImageId};
use crate::symmetry::{SymmetryPair, SymmetryRegistry};

/// The kind of user-visible change a history entry represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionType {
    Baseline,
    ElementAdded,
    ElementUpdated,
    ElementsUpdated,
    ElementsDeleted,
    ElementsDuplicated,
    ElementsPasted,
    ElementsMoved,
    ElementResized,
    ElementsNudged,
    SymmetryCreated,
    SymmetryBroken,
    BackgroundChanged,
    FormatChanged,
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ActionType::Baseline => "Open document",
            ActionType::ElementAdded => "Add element",
            ActionType::ElementUpdated => "Edit element",
            ActionType::ElementsUpdated => "Edit elements",
            ActionType::ElementsDeleted => "Delete",
            ActionType::ElementsDuplicated => "Duplicate",
            ActionType::ElementsPasted => "Paste",
            ActionType::ElementsMoved => "Move",
            ActionType::ElementResized => "Resize",
            ActionType::ElementsNudged => "Nudge",
            ActionType::SymmetryCreated => "Create symmetry",
            ActionType::SymmetryBroken => "Break symmetry",
            ActionType::BackgroundChanged => "Change background",
            ActionType::FormatChanged => "Change format",
        };
        write!(f, "{}", label)
    }
}

/// Label attached to a committed snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryAction {
    pub action_type: ActionType,
    pub description: String,
}

impl HistoryAction {
    pub fn new(action_type: ActionType, description: impl Into<String>) -> Self {
        Self {
            action_type,
            description: description.into(),
        }
    }

    /// Action whose description is the action type's default label.
    pub fn simple(action_type: ActionType) -> Self {
        Self::new(action_type, action_type.to_string())
    }
}

/// Immutable snapshot of everything undo restores.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryState {
    pub elements: Vec<Element>,
    pub background: Option<ImageId>,
    pub symmetry_pairs: Vec<SymmetryPair>,
    /// Badge format at commit time, so undoing a format change restores it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<BadgeFormat>,
}

impl HistoryState {
    pub fn new(
        elements: &[Element],
        background: Option<&ImageId>,
        registry: &SymmetryRegistry,
    ) -> Self {
        Self {
            elements: elements.to_vec(),
            background: background.cloned(),
            symmetry_pairs: registry.entries(),
            format: None,
        }
    }

    pub fn with_format(mut self, format: &BadgeFormat) -> Self {
        self.format = Some(format.clone());
        self
    }

    /// Rebuilds the runtime registry from the snapshot's pair list.
    pub fn registry(&self) -> SymmetryRegistry {
        match SymmetryRegistry::try_from(self.symmetry_pairs.clone()) {
            Ok(registry) => registry,
            Err(e) => {
                tracing::warn!("Discarding malformed symmetry pairs in snapshot: {}", e);
                SymmetryRegistry::new()
            }
        }
    }
}

#[derive(Debug, Clone)]
struct HistoryEntry {
    state: HistoryState,
    action: HistoryAction,
}

/// Bounded snapshot history with a current index.
#[derive(Debug, Clone)]
pub struct UndoRedoManager {
    entries: VecDeque<HistoryEntry>,
    index: Option<usize>,
    max_entries: usize,
}

impl UndoRedoManager {
    /// Creates an empty history holding at most `max_entries` snapshots.
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            index: None,
            max_entries: max_entries.max(1),
        }
    }

    /// Appends a snapshot after the current index.
    pub fn commit(&mut self, state: HistoryState, action: HistoryAction) {
        let keep = self.index.map_or(0, |i| i + 1);
        self.entries.truncate(keep);
        self.entries.push_back(HistoryEntry { state, action });
        while self.entries.len() > self.max_entries {
            self.entries.pop_front();
        }
        let next = self.index.map_or(0, |i| i + 1);
        self.index = Some(next.min(self.max_entries - 1));

        tracing::debug!(
            index = ?self.index,
            len = self.entries.len(),
            "History commit: {}",
            self.entries
                .back()
                .map(|e| e.action.description.as_str())
                .unwrap_or_default()
        );
    }

    /// Steps back one entry. No-op at the oldest retained entry.
    pub fn undo(&mut self) -> Option<HistoryState> {
        let index = self.index?;
        if index == 0 {
            return None;
        }
        self.index = Some(index - 1);
        tracing::debug!("Undo: {}", self.entries[index].action.description);
        Some(self.entries[index - 1].state.clone())
    }

    /// Steps forward one entry. No-op at the tail.
    pub fn redo(&mut self) -> Option<HistoryState> {
        let index = self.index?;
        if index + 1 >= self.entries.len() {
            return None;
        }
        self.index = Some(index + 1);
        let entry = &self.entries[index + 1];
        tracing::debug!("Redo: {}", entry.action.description);
        Some(entry.state.clone())
    }

    pub fn can_undo(&self) -> bool {
        self.index.is_some_and(|i| i > 0)
    }

    pub fn can_redo(&self) -> bool {
        self.index.is_some_and(|i| i + 1 < self.entries.len())
    }

    /// Number of undo steps available.
    pub fn undo_depth(&self) -> usize {
        self.index.unwrap_or(0)
    }

    /// Number of redo steps available.
    pub fn redo_depth(&self) -> usize {
        match self.index {
            Some(i) => self.entries.len() - 1 - i,
            None => 0,
        }
    }

    /// Label of the step `undo()` would revert.
    pub fn undo_action(&self) -> Option<&HistoryAction> {
        let i = self.index.filter(|&i| i > 0)?;
        self.entries.get(i).map(|e| &e.action)
    }

    /// Label of the step `redo()` would reapply.
    pub fn redo_action(&self) -> Option<&HistoryAction> {
        let i = self.index?;
        self.entries.get(i + 1).map(|e| &e.action)
    }

    pub fn current(&self) -> Option<&HistoryState> {
        self.index.and_then(|i| self.entries.get(i)).map(|e| &e.state)
    }

    /// Current index, `None` when empty.
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.index = None;
    }

    /// Replaces the whole history with a single baseline snapshot.
    pub fn reset(&mut self, baseline: HistoryState) {
        self.clear();
        self.commit(baseline, HistoryAction::simple(ActionType::Baseline));
    }
}

impl Default for UndoRedoManager {
    fn default() -> Self {
        Self::new(badgekit_core::constants::MAX_HISTORY)
    }
}
