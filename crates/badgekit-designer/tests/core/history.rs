use badgekit_designer::history::{ActionType, HistoryAction, HistoryState, UndoRedoManager};
use badgekit_designer::ImageId;

fn state(n: usize) -> HistoryState {
    HistoryState {
        background: Some(ImageId::from(format!("bg-{}", n).as_str())),
        ..HistoryState::default()
    }
}

fn edit() -> HistoryAction {
    HistoryAction::simple(ActionType::ElementUpdated)
}

#[test]
fn test_create_history_action() {
    let action = HistoryAction::new(ActionType::ElementAdded, "Added text");

    assert_eq!(action.action_type, ActionType::ElementAdded);
    assert_eq!(action.description, "Added text");
    assert_eq!(HistoryAction::simple(ActionType::SymmetryCreated).description, "Create symmetry");
}

#[test]
fn test_undo_redo_manager_creation() {
    let manager = UndoRedoManager::new(50);
    assert!(!manager.can_undo());
    assert!(!manager.can_redo());
    assert_eq!(manager.undo_depth(), 0);
    assert_eq!(manager.redo_depth(), 0);
    assert_eq!(manager.index(), None);
    assert!(manager.is_empty());
}

#[test]
fn test_first_commit_is_not_undoable() {
    let mut manager = UndoRedoManager::new(50);
    manager.commit(state(0), edit());

    assert_eq!(manager.index(), Some(0));
    assert!(!manager.can_undo());
    assert_eq!(manager.undo(), None);
    assert_eq!(manager.current(), Some(&state(0)));
}

#[test]
fn test_undo_then_redo() {
    let mut manager = UndoRedoManager::new(50);
    manager.commit(state(0), edit());
    manager.commit(state(1), edit());

    assert_eq!(manager.undo(), Some(state(0)));
    assert!(manager.can_redo());
    assert_eq!(manager.redo(), Some(state(1)));
    assert!(!manager.can_redo());
    assert_eq!(manager.redo(), None);
}

#[test]
fn test_multiple_undo_redo() {
    let mut manager = UndoRedoManager::new(50);

    for i in 0..6 {
        manager.commit(state(i), edit());
    }

    assert_eq!(manager.undo_depth(), 5);
    assert_eq!(manager.redo_depth(), 0);

    // Undo all
    for _ in 0..5 {
        manager.undo();
    }
    assert_eq!(manager.undo_depth(), 0);
    assert_eq!(manager.redo_depth(), 5);
    assert_eq!(manager.current(), Some(&state(0)));

    // Redo all
    for _ in 0..5 {
        manager.redo();
    }
    assert_eq!(manager.undo_depth(), 5);
    assert_eq!(manager.redo_depth(), 0);
    assert_eq!(manager.current(), Some(&state(5)));
}

#[test]
fn test_commit_after_undo_discards_future() {
    let mut manager = UndoRedoManager::new(50);
    manager.commit(state(0), edit());
    manager.commit(state(1), edit());
    manager.commit(state(2), edit());
    manager.undo();
    manager.undo();

    assert_eq!(manager.redo_depth(), 2);

    manager.commit(state(3), edit());
    assert_eq!(manager.len(), 2);
    assert_eq!(manager.redo_depth(), 0);
    assert_eq!(manager.redo(), None);
    assert_eq!(manager.undo(), Some(state(0)));
}

#[test]
fn test_cap_drops_oldest_entries() {
    let mut manager = UndoRedoManager::new(99);

    for i in 0..101 {
        manager.commit(state(i), edit());
    }

    assert_eq!(manager.len(), 99);
    assert_eq!(manager.index(), Some(98));

    let mut last = None;
    while let Some(s) = manager.undo() {
        last = Some(s);
    }
    // States 0 and 1 were dropped.
    assert_eq!(last, Some(state(2)));
    assert_eq!(manager.undo_depth(), 0);
}

#[test]
fn test_action_labels_follow_index() {
    let mut manager = UndoRedoManager::new(10);
    manager.commit(state(0), HistoryAction::simple(ActionType::Baseline));
    manager.commit(state(1), HistoryAction::simple(ActionType::ElementsDeleted));

    assert_eq!(
        manager.undo_action().map(|a| a.action_type),
        Some(ActionType::ElementsDeleted)
    );
    assert!(manager.redo_action().is_none());

    manager.undo();
    assert!(manager.undo_action().is_none());
    assert_eq!(
        manager.redo_action().map(|a| a.action_type),
        Some(ActionType::ElementsDeleted)
    );
}

#[test]
fn test_clear_and_reset() {
    let mut manager = UndoRedoManager::new(50);
    manager.commit(state(0), edit());
    manager.commit(state(1), edit());

    manager.clear();
    assert!(!manager.can_undo());
    assert!(!manager.can_redo());
    assert_eq!(manager.len(), 0);

    manager.reset(state(7));
    assert_eq!(manager.len(), 1);
    assert_eq!(manager.current(), Some(&state(7)));
    assert!(!manager.can_undo());
}
