//! # BadgeKit
//!
//! Layout engine for printable event badges:
//! - WYSIWYG placement of text, QR code and image elements on a fixed badge format
//! - Central symmetry pairs for fold-over badges (clone mirrored through the center)
//! - Snap-to-guide alignment against the canvas and other elements
//! - Bounded undo/redo history with one entry per user gesture
//! - Versioned JSON documents with template variable extraction
//!
//! ## Architecture
//!
//! BadgeKit is organized as a workspace with multiple crates:
//!
//! 1. **badgekit-core** - Units, badge formats, constants, errors, notifications
//! 2. **badgekit-settings** - TOML/JSON configuration
//! 3. **badgekit-designer** - The editing engine (elements, symmetry, history, snapping, gestures)
//! 4. **badgekit** - This crate: re-exports, logging setup and the `badgekit` CLI

pub use badgekit_designer as designer;
pub use badgekit_settings as settings;

pub use badgekit_core::{
    format_mm, BadgeFormat, DocumentError, Error, FormatPreset, Notification,
    NotificationCenter, NotificationLevel, PersistenceError, Result,
};

pub use badgekit_designer::{
    BadgeDocument, Bounds, CommandOutcome, DesignerCommand, DesignerState, DocumentId,
    DocumentStore, Element, ElementKind, ElementPatch, FileDocumentStore, ImageLibrary, KeyChord,
    MemoryDocumentStore, Point, PointerModifiers, SymmetryRegistry, Viewport,
};

pub use badgekit_settings::{Config, DesignerSettings, StorageSettings};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Output on stderr so command output on stdout stays clean
/// - RUST_LOG environment variable support (INFO when unset)
/// - JSON lines instead of the human format when `json` is set
pub fn init_logging(json: bool) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(tracing::Level::INFO.to_string()));

    let registry = tracing_subscriber::registry().with(env_filter);
    if json {
        registry
            .with(fmt::layer().with_writer(std::io::stderr).json())
            .try_init()?;
    } else {
        registry
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_level(true)
                    .with_line_number(true),
            )
            .try_init()?;
    }

    Ok(())
}
