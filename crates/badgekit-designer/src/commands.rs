//! Closed set of engine commands.
//!
//! A host front-end drives the engine through
//! [`DesignerState::dispatch`](crate::DesignerState::dispatch) instead of
//! calling individual mutators.

use serde::{Deserialize, Serialize};

use badgekit_core::BadgeFormat;

use crate::model::{ElementId, ElementKind, ElementPatch, ImageId, Point};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", content = "args", rename_all = "camelCase")]
#[allow(clippy::large_enum_variant)]
pub enum DesignerCommand {
    /// Adds an element; `position` is its center in badge space
    /// (defaults to the canvas center).
    AddElement {
        kind: ElementKind,
        #[serde(default)]
        position: Option<Point>,
    },
    UpdateElement {
        id: ElementId,
        patch: ElementPatch,
        #[serde(default)]
        skip_history: bool,
    },
    BatchUpdate {
        updates: Vec<(ElementId, ElementPatch)>,
        #[serde(default)]
        skip_history: bool,
    },
    Delete {
        ids: Vec<ElementId>,
    },
    Duplicate {
        ids: Vec<ElementId>,
    },
    Undo,
    Redo,
    CreateSymmetry {
        ids: Vec<ElementId>,
    },
    BreakSymmetry {
        ids: Vec<ElementId>,
    },
    Copy,
    Paste,
    SelectAll,
    DeselectAll,
    /// Moves the selection by whole pixels.
    Nudge {
        dx: f64,
        dy: f64,
    },
    SetBackground {
        image: Option<ImageId>,
    },
    SetFormat {
        format: BadgeFormat,
    },
}

impl DesignerCommand {
    /// Short label for logs.
    pub fn name(&self) -> &'static str {
        match self {
            DesignerCommand::AddElement { .. } => "add-element",
            DesignerCommand::UpdateElement { .. } => "update-element",
            DesignerCommand::BatchUpdate { .. } => "batch-update",
            DesignerCommand::Delete { .. } => "delete",
            DesignerCommand::Duplicate { .. } => "duplicate",
            DesignerCommand::Undo => "undo",
            DesignerCommand::Redo => "redo",
            DesignerCommand::CreateSymmetry { .. } => "create-symmetry",
            DesignerCommand::BreakSymmetry { .. } => "break-symmetry",
            DesignerCommand::Copy => "copy",
            DesignerCommand::Paste => "paste",
            DesignerCommand::SelectAll => "select-all",
            DesignerCommand::DeselectAll => "deselect-all",
            DesignerCommand::Nudge { .. } => "nudge",
            DesignerCommand::SetBackground { .. } => "set-background",
            DesignerCommand::SetFormat { .. } => "set-format",
        }
    }
}

/// Result of dispatching one command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutcome {
    /// A history snapshot was committed.
    pub committed: bool,
    /// Elements created, changed or removed (partners included).
    pub affected: Vec<ElementId>,
}

impl CommandOutcome {
    pub fn unchanged() -> Self {
        Self::default()
    }

    pub fn committed(affected: Vec<ElementId>) -> Self {
        Self {
            committed: true,
            affected,
        }
    }

    pub fn uncommitted(affected: Vec<ElementId>) -> Self {
        Self {
            committed: false,
            affected,
        }
    }
}
