//! Error types for rename operations

use std::path::PathBuf;
use thiserror::Error;

/// Renamer error types
#[derive(Error, Debug)]
pub enum RenameError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Path {} does not exist", .0.display())]
    PathNotFound(PathBuf),

    #[error("{} is not a file", .0.display())]
    NotAFile(PathBuf),

    #[error("{} is not a directory", .0.display())]
    NotADirectory(PathBuf),

    #[error("Could not read file {}: {reason}", .path.display())]
    ContentUnreadable { path: PathBuf, reason: String },

    #[error("Failed to rename {} -> {to}: {source}", .from.display())]
    RenameFailed {
        from: PathBuf,
        to: String,
        #[source]
        source: std::io::Error,
    },

    #[error("PDF error: {0}")]
    Pdf(String),
}

impl RenameError {
    /// Shorthand for a content extraction failure
    pub fn unreadable(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        RenameError::ContentUnreadable {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

/// Result type for renamer operations
pub type Result<T> = std::result::Result<T, RenameError>;

impl From<lopdf::Error> for RenameError {
    fn from(e: lopdf::Error) -> Self {
        RenameError::Pdf(e.to_string())
    }
}
