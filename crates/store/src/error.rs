//! Error types for the file-backed stores.

use thiserror::Error;

/// Errors surfaced by the save store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors surfaced when loading or writing a map.
#[derive(Debug, Error)]
pub enum MapError {
    #[error("map not found: {0}")]
    NotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid map shape: {0}")]
    InvalidShape(String),
}

impl MapError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, MapError::NotFound(_))
    }
}
