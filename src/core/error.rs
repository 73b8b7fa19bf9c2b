//! Error types for the brush tool

use thiserror::Error;

use crate::brush::{BrushId, TemplateId};

/// Main error type for configuration and persistence.
///
/// Placement rejection is not an error; see `placement::PlacementOutcome`.
#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid brush kind: {0}")]
    InvalidBrushKind(String),

    #[error("Brush not found: {0:?}")]
    BrushNotFound(BrushId),

    #[error("Template not found: {0:?}")]
    TemplateNotFound(TemplateId),

    #[error("Settings index {index} out of range (len {len})")]
    SettingsIndex { index: usize, len: usize },

    #[error("Invalid store entry: {0}")]
    InvalidStoreEntry(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
