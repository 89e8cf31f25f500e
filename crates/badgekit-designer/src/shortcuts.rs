//! Keyboard shortcut table.
//!
//! Resolves toolkit-neutral key chords into editor actions and maps those
//! actions onto engine commands. `Save` has no engine command: the host
//! owns the asynchronous save boundary.

use serde::{Deserialize, Serialize};

use crate::commands::DesignerCommand;
use crate::model::ElementId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    /// A printable key, compared case-insensitively.
    Char(char),
    Delete,
    Backspace,
    Escape,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
}

/// A key plus modifiers. `ctrl` covers both Control and Command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyChord {
    pub key: Key,
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

impl KeyChord {
    pub fn plain(key: Key) -> Self {
        Self {
            key,
            ctrl: false,
            shift: false,
            alt: false,
        }
    }

    pub fn ctrl(key: Key) -> Self {
        Self {
            ctrl: true,
            ..Self::plain(key)
        }
    }

    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ShortcutAction {
    Save,
    Undo,
    Redo,
    Copy,
    Paste,
    Delete,
    Duplicate,
    SelectAll,
    /// Cancels an active gesture, otherwise clears the selection.
    Escape,
    /// Unit direction; the step size is applied when mapping to a command.
    Nudge { dx: i8, dy: i8, large: bool },
}

/// Looks up the action bound to `chord`.
pub fn resolve(chord: &KeyChord) -> Option<ShortcutAction> {
    let key = match chord.key {
        Key::Char(c) => Key::Char(c.to_ascii_lowercase()),
        other => other,
    };

    let action = match (key, chord.ctrl, chord.shift) {
        (Key::Char('s'), true, _) => ShortcutAction::Save,
        (Key::Char('z'), true, false) => ShortcutAction::Undo,
        (Key::Char('z'), true, true) | (Key::Char('y'), true, _) => ShortcutAction::Redo,
        (Key::Char('c'), true, _) => ShortcutAction::Copy,
        (Key::Char('v'), true, _) => ShortcutAction::Paste,
        (Key::Char('d'), true, _) => ShortcutAction::Duplicate,
        (Key::Char('a'), true, _) => ShortcutAction::SelectAll,
        (Key::Delete, false, _) | (Key::Backspace, false, _) => ShortcutAction::Delete,
        (Key::Escape, _, _) => ShortcutAction::Escape,
        (Key::ArrowUp, false, large) => nudge(0, -1, large),
        (Key::ArrowDown, false, large) => nudge(0, 1, large),
        (Key::ArrowLeft, false, large) => nudge(-1, 0, large),
        (Key::ArrowRight, false, large) => nudge(1, 0, large),
        _ => return None,
    };
    Some(action)
}

fn nudge(dx: i8, dy: i8, large: bool) -> ShortcutAction {
    ShortcutAction::Nudge { dx, dy, large }
}

/// Step sizes for arrow-key nudges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NudgeSteps {
    pub small: f64,
    pub large: f64,
}

impl Default for NudgeSteps {
    fn default() -> Self {
        Self {
            small: badgekit_core::constants::NUDGE_STEP_PX,
            large: badgekit_core::constants::NUDGE_STEP_LARGE_PX,
        }
    }
}

/// Maps an action onto an engine command for the current selection.
///
/// Returns `None` for `Save` and `Escape` (handled by the host and the
/// gesture layer) and for selection-bound actions with nothing selected.
pub fn to_command(
    action: ShortcutAction,
    selection: &[ElementId],
    steps: NudgeSteps,
) -> Option<DesignerCommand> {
    let needs_selection = matches!(
        action,
        ShortcutAction::Delete | ShortcutAction::Duplicate | ShortcutAction::Nudge { .. }
    );
    if needs_selection && selection.is_empty() {
        return None;
    }

    match action {
        ShortcutAction::Save | ShortcutAction::Escape => None,
        ShortcutAction::Undo => Some(DesignerCommand::Undo),
        ShortcutAction::Redo => Some(DesignerCommand::Redo),
        ShortcutAction::Copy => Some(DesignerCommand::Copy),
        ShortcutAction::Paste => Some(DesignerCommand::Paste),
        ShortcutAction::SelectAll => Some(DesignerCommand::SelectAll),
        ShortcutAction::Delete => Some(DesignerCommand::Delete {
            ids: selection.to_vec(),
        }),
        ShortcutAction::Duplicate => Some(DesignerCommand::Duplicate {
            ids: selection.to_vec(),
        }),
        ShortcutAction::Nudge { dx, dy, large } => {
            let step = if large { steps.large } else { steps.small };
            Some(DesignerCommand::Nudge {
                dx: dx as f64 * step,
                dy: dy as f64 * step,
            })
        }
    }
}
