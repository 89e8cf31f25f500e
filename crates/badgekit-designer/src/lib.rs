//! # BadgeKit Designer
//!
//! This crate provides the geometric editing engine behind the badge
//! designer: a single-document 2D layout engine over a fixed-size badge
//! canvas, with central-symmetry pairs, undo/redo history, snap-to-guide
//! alignment and pointer gesture handling.
//!
//! ## Core Components
//!
//! ### Document Model
//! - **Elements**: Text, QR codes and images with shared geometry and style
//! - **Transform**: CSS-style rotation composition that keeps other transforms
//! - **Images**: Id-addressed uploaded image library
//! - **Variables**: `{{name}}` placeholders extracted from text
//!
//! ### Editing Engine
//! - **Symmetry**: Parent/clone point reflection through the canvas center
//! - **History**: Bounded snapshot list with undo/redo by index
//! - **Snapping**: Canvas and element guides with adjacency detection
//! - **Selection**: Click, toggle and marquee selection
//! - **Commands**: Closed command set dispatched against [`DesignerState`]
//!
//! ### Interaction
//! - **Viewport**: Pan/zoom and screen to badge coordinate mapping
//! - **Gestures**: Drag, 8-handle resize and marquee state machine
//! - **Shortcuts**: Keyboard chords mapped onto commands
//!
//! ### Persistence
//! - **Serialization**: Versioned JSON badge documents
//! - **Stores**: File-backed and in-memory document stores
//!
//! ## Architecture
//!
//! ```text
//! DesignerState (single document)
//!   ├── Elements + Symmetry registry + Background
//!   ├── SelectionManager / Clipboard
//!   ├── UndoRedoManager (HistoryState snapshots)
//!   ├── GestureState (drag | resize | marquee)
//!   │     └── Snapper (guides)
//!   └── Viewport (pan/zoom)
//!
//! DocumentStore (save/load contract)
//!   └── BadgeDocument (JSON)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use badgekit_designer::{DesignerState, ElementKind, Point};
//!
//! let mut state = DesignerState::new();
//! let center = state.canvas_center();
//! let id = state.add_element(
//!     ElementKind::QrCode { content: "https://example.com".into() },
//!     Some(Point::new(center.x, center.y - 600.0)),
//! );
//! state.create_symmetry(&[id]);
//! assert_eq!(state.element_count(), 2);
//! assert!(state.check_symmetry().is_empty());
//! ```

pub mod commands;
pub mod designer_state;
pub mod history;
pub mod images;
pub mod interaction;
pub mod model;
pub mod persistence;
pub mod selection_manager;
pub mod serialization;
pub mod shortcuts;
pub mod snapping;
pub mod symmetry;
pub mod text_metrics;
pub mod transform;
pub mod variables;
pub mod viewport;

pub use commands::{CommandOutcome, DesignerCommand};
pub use designer_state::DesignerState;
pub use history::{ActionType, HistoryAction, HistoryState, UndoRedoManager};
pub use images::{ImageAsset, ImageLibrary};
pub use interaction::{GestureState, PointerModifiers, ResizeHandle};
pub use model::{
    Bounds, Element, ElementId, ElementKind, ElementPatch, ElementStyle, ElementType, ImageId,
    Point, StylePatch,
};
pub use persistence::{DocumentId, DocumentStore, FileDocumentStore, MemoryDocumentStore};
pub use selection_manager::SelectionManager;
pub use serialization::{BadgeDocument, DocumentMetadata, DOCUMENT_FORMAT_VERSION};
pub use shortcuts::{Key, KeyChord, ShortcutAction};
pub use snapping::{Axis, GuideKind, SnapGuide, SnapResult, Snapper};
pub use symmetry::{PairRole, SymmetryPair, SymmetryRegistry};
pub use text_metrics::{FontMeasurer, TextMeasurer, TextSize};
pub use transform::compose_rotation;
pub use viewport::Viewport;
