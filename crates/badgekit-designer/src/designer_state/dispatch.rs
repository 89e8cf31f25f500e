//! Command dispatcher and keyboard shortcut handling.

use super::DesignerState;
use crate::commands::{CommandOutcome, DesignerCommand};
use crate::shortcuts::{resolve, to_command, KeyChord, ShortcutAction};

impl DesignerState {
    /// Executes one command.
    pub fn dispatch(&mut self, command: DesignerCommand) -> CommandOutcome {
        tracing::debug!(command = command.name(), "Dispatch");

        match command {
            DesignerCommand::AddElement { kind, position } => {
                let id = self.add_element(kind, position);
                CommandOutcome::committed(vec![id])
            }
            DesignerCommand::UpdateElement {
                id,
                patch,
                skip_history,
            } => self.update_element(id, patch, skip_history),
            DesignerCommand::BatchUpdate {
                updates,
                skip_history,
            } => self.batch_update_elements(&updates, skip_history),
            DesignerCommand::Delete { ids } => self.delete_elements(&ids),
            DesignerCommand::Duplicate { ids } => committed_if_any(self.duplicate_elements(&ids)),
            DesignerCommand::Undo => self.step_history(true),
            DesignerCommand::Redo => self.step_history(false),
            DesignerCommand::CreateSymmetry { ids } => self.create_symmetry(&ids),
            DesignerCommand::BreakSymmetry { ids } => self.break_symmetry(&ids),
            DesignerCommand::Copy => {
                self.copy_selection();
                CommandOutcome::unchanged()
            }
            DesignerCommand::Paste => committed_if_any(self.paste()),
            DesignerCommand::SelectAll => {
                self.select_all();
                CommandOutcome::unchanged()
            }
            DesignerCommand::DeselectAll => {
                self.deselect_all();
                CommandOutcome::unchanged()
            }
            DesignerCommand::Nudge { dx, dy } => self.nudge_selection(dx, dy),
            DesignerCommand::SetBackground { image } => self.set_background(image),
            DesignerCommand::SetFormat { format } => self.set_format(format),
        }
    }

    fn step_history(&mut self, backwards: bool) -> CommandOutcome {
        let before: Vec<_> = self.elements.iter().map(|e| e.id).collect();
        let moved = if backwards { self.undo() } else { self.redo() };
        if moved {
            CommandOutcome::uncommitted(self.ids_touched_by(&before))
        } else {
            CommandOutcome::unchanged()
        }
    }

    /// Handles a key press.
    ///
    /// Escape cancels an active gesture, otherwise clears the selection.
    /// Returns the resolved action (so the host can act on `Save`) and the
    /// outcome of any engine command it mapped to.
    pub fn handle_key(&mut self, chord: &KeyChord) -> Option<(ShortcutAction, CommandOutcome)> {
        let action = resolve(chord)?;

        if action == ShortcutAction::Escape {
            if !self.cancel_gesture() {
                self.deselect_all();
            }
            return Some((action, CommandOutcome::unchanged()));
        }

        let outcome = match to_command(action, self.selection.selected_ids(), self.nudge_steps) {
            Some(command) => self.dispatch(command),
            None => CommandOutcome::unchanged(),
        };
        Some((action, outcome))
    }
}

fn committed_if_any(ids: Vec<crate::model::ElementId>) -> CommandOutcome {
    if ids.is_empty() {
        CommandOutcome::unchanged()
    } else {
        CommandOutcome::committed(ids)
    }
}
