//! Unified error types for the photo sorter.

use std::path::PathBuf;
use thiserror::Error;

/// Application-specific errors.
///
/// Failures that concern a single image (decode, move) never end the session;
/// the caller reports them and carries on browsing.
#[derive(Debug, Error)]
pub enum SortError {
    /// The file could not be opened or parsed as an image.
    #[error("Could not load {}: {reason}", .path.display())]
    Decode { path: PathBuf, reason: String },

    /// Moving the current image into a category folder failed.
    #[error("Could not move {file_name}: {source}")]
    Move {
        file_name: String,
        #[source]
        source: std::io::Error,
    },

    /// Category edit submitted without a name or destination.
    #[error("Please enter both a name and a folder")]
    InvalidCategoryInput,

    /// Slot index outside 0..=8.
    #[error("Category slot {0} does not exist")]
    SlotOutOfRange(usize),

    /// Settings file could not be written.
    #[error("Could not save settings: {0}")]
    Settings(String),
}

impl From<serde_json::Error> for SortError {
    fn from(err: serde_json::Error) -> Self {
        SortError::Settings(err.to_string())
    }
}

/// Type alias for Results in this application.
pub type Result<T> = std::result::Result<T, SortError>;
