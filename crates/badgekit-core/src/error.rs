//! Error handling for BadgeKit
//!
//! The editing engine recovers every geometric anomaly locally (clamping,
//! no-ops, fallbacks). Errors only exist at the persistence boundary and
//! for malformed documents:
//! - Persistence errors (save/load rejected or failed)
//! - Document errors (malformed or unsupported document content)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Persistence error type
///
/// Raised by document store collaborators. A persistence failure never
/// mutates engine state; it is surfaced to the user as a notification.
#[derive(Error, Debug)]
pub enum PersistenceError {
    /// The backend refused the document
    #[error("Save rejected: {reason}")]
    Rejected {
        /// The reason given by the backend.
        reason: String,
    },

    /// No document exists with the given id
    #[error("Document not found: {id}")]
    NotFound {
        /// The requested document id.
        id: String,
    },

    /// Document could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Underlying storage I/O failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored document decoded but is not acceptable
    #[error("Invalid document: {0}")]
    Invalid(#[from] DocumentError),
}

/// Document error type
///
/// Represents document content the engine cannot accept as-is.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DocumentError {
    /// Format preset name is not known
    #[error("Unknown badge format: {name}")]
    UnknownFormat {
        /// The unrecognised preset name.
        name: String,
    },

    /// Document was written by an unsupported format version
    #[error("Unsupported document version {found} (expected {expected})")]
    UnsupportedVersion {
        /// Version found in the document.
        found: String,
        /// Version this build writes.
        expected: String,
    },

    /// Two elements share an id
    #[error("Duplicate element id {id}")]
    DuplicateElement {
        /// The repeated id.
        id: u64,
    },

    /// Symmetry registry refers to the same element twice
    #[error("Malformed symmetry registry: {reason}")]
    MalformedSymmetry {
        /// What is wrong with the registry.
        reason: String,
    },
}

/// Main error type for BadgeKit
///
/// A unified error type that can represent any error from all layers.
#[derive(Error, Debug)]
pub enum Error {
    /// Persistence error
    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    /// Document error
    #[error(transparent)]
    Document(#[from] DocumentError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a persistence error
    pub fn is_persistence_error(&self) -> bool {
        matches!(self, Error::Persistence(_))
    }

    /// Check if this is a document error
    pub fn is_document_error(&self) -> bool {
        matches!(self, Error::Document(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
