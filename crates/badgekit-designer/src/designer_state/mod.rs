//! Designer state: the single-document badge editing engine.
//!
//! Owns the element collection, background, symmetry registry, selection,
//! clipboard, history and the active pointer gesture. Every mutation goes
//! through this type so that symmetry partners are re-mirrored in the same
//! pass and each discrete user action ends in exactly one history commit.
//!
//! This module is split into submodules:
//! - `history`: Commit, undo/redo and snapshot restore
//! - `shapes`: Add, update, delete, duplicate, clipboard, nudge
//! - `symmetry`: Create/break symmetry pairs
//! - `gestures`: Drag, resize and marquee state machine
//! - `document`: Format and background changes
//! - `file_io`: Save/load through a document store or a file
//! - `dispatch`: Command dispatcher and keyboard shortcuts

mod dispatch;
mod document;
mod file_io;
mod gestures;
mod history;
mod shapes;
mod symmetry;

use chrono::{DateTime, Utc};
use std::sync::Arc;

use badgekit_core::{notification_center, BadgeFormat, NotificationCenter};
use badgekit_settings::DesignerSettings;

use crate::history::{HistoryState, UndoRedoManager};
use crate::images::ImageLibrary;
use crate::interaction::GestureState;
use crate::model::{Bounds, Element, ElementId, ImageId, Point};
use crate::persistence::DocumentId;
use crate::selection_manager::SelectionManager;
use crate::shortcuts::NudgeSteps;
use crate::snapping::Snapper;
use crate::symmetry::SymmetryRegistry;
use crate::text_metrics::{FontMeasurer, TextMeasurer};
use crate::viewport::Viewport;

/// Fraction of the view kept free around the badge when fitting it.
const FIT_PADDING: f64 = 0.05;

/// Designer state for UI integration
#[derive(Clone)]
pub struct DesignerState {
    elements: Vec<Element>,
    background: Option<ImageId>,
    symmetry: SymmetryRegistry,
    format: BadgeFormat,
    dpi: f64,
    history: UndoRedoManager,
    clipboard: Vec<Element>,
    gesture: GestureState,
    snapper: Snapper,
    measurer: Arc<dyn TextMeasurer>,
    notifications: NotificationCenter,
    next_id: ElementId,
    paste_offset: f64,
    nudge_steps: NudgeSteps,
    min_size: f64,
    created: Option<DateTime<Utc>>,
    pub selection: SelectionManager,
    pub viewport: Viewport,
    pub images: ImageLibrary,
    pub document_name: String,
    pub document_id: Option<DocumentId>,
    pub is_modified: bool,
}

impl DesignerState {
    /// Creates an engine with default settings on an empty document.
    pub fn new() -> Self {
        Self::with_settings(&DesignerSettings::default())
    }

    /// Creates an engine configured from `settings`.
    pub fn with_settings(settings: &DesignerSettings) -> Self {
        let format = settings.default_format.format();
        let mut state = Self {
            elements: Vec::new(),
            background: None,
            symmetry: SymmetryRegistry::new(),
            format,
            dpi: settings.dpi,
            history: UndoRedoManager::new(settings.max_history),
            clipboard: Vec::new(),
            gesture: GestureState::Idle,
            snapper: Snapper::new(settings.snap_threshold_px).with_enabled(settings.snap_enabled),
            measurer: Arc::new(FontMeasurer),
            notifications: notification_center().clone(),
            next_id: 1,
            paste_offset: settings.paste_offset_px,
            nudge_steps: NudgeSteps {
                small: settings.nudge_step_px,
                large: settings.nudge_step_large_px,
            },
            min_size: settings.min_element_size_px,
            created: None,
            selection: SelectionManager::new(),
            viewport: Viewport::default(),
            images: ImageLibrary::new(),
            document_name: "Untitled badge".to_string(),
            document_id: None,
            is_modified: false,
        };
        state.fit_view();
        state.reset_history();
        state
    }

    /// Replaces the text measurer.
    pub fn with_measurer(mut self, measurer: Arc<dyn TextMeasurer>) -> Self {
        self.measurer = measurer;
        self
    }

    /// Publishes save/load notifications to `center` instead of the global one.
    pub fn with_notifications(mut self, center: NotificationCenter) -> Self {
        self.notifications = center;
        self
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }

    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    pub fn background(&self) -> Option<&ImageId> {
        self.background.as_ref()
    }

    pub fn symmetry(&self) -> &SymmetryRegistry {
        &self.symmetry
    }

    pub fn format(&self) -> &BadgeFormat {
        &self.format
    }

    pub fn dpi(&self) -> f64 {
        self.dpi
    }

    /// Badge size in pixels.
    pub fn canvas_size(&self) -> (f64, f64) {
        self.format.pixel_size(self.dpi)
    }

    pub fn canvas_bounds(&self) -> Bounds {
        let (w, h) = self.canvas_size();
        Bounds::new(0.0, 0.0, w, h)
    }

    pub fn canvas_center(&self) -> Point {
        let (x, y) = self.format.center(self.dpi);
        Point::new(x, y)
    }

    pub fn history(&self) -> &UndoRedoManager {
        &self.history
    }

    pub fn gesture(&self) -> &GestureState {
        &self.gesture
    }

    pub fn snapper(&self) -> &Snapper {
        &self.snapper
    }

    pub fn set_snap_enabled(&mut self, enabled: bool) {
        self.snapper = self.snapper.with_enabled(enabled);
    }

    pub fn clipboard(&self) -> &[Element] {
        &self.clipboard
    }

    pub fn nudge_steps(&self) -> NudgeSteps {
        self.nudge_steps
    }

    pub fn notifications(&self) -> &NotificationCenter {
        &self.notifications
    }

    pub fn selected_ids(&self) -> Vec<ElementId> {
        self.selection.selected_ids().to_vec()
    }

    /// Current state as an immutable snapshot.
    pub fn snapshot(&self) -> HistoryState {
        HistoryState::new(&self.elements, self.background.as_ref(), &self.symmetry)
            .with_format(&self.format)
    }

    /// Fits the badge into the viewport.
    pub fn fit_view(&mut self) {
        let (w, h) = self.canvas_size();
        self.viewport.fit_badge(w, h, FIT_PADDING);
    }

    fn alloc_id(&mut self) -> ElementId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn position_of(&self, id: ElementId) -> Option<usize> {
        self.elements.iter().position(|e| e.id == id)
    }
}

impl Default for DesignerState {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for DesignerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DesignerState")
            .field("format", &self.format)
            .field("elements", &self.elements.len())
            .field("pairs", &self.symmetry.len())
            .field("selected", &self.selection.len())
            .field("history", &self.history.len())
            .field("gesture", &self.gesture.name())
            .finish()
    }
}
