//! Error types for romatag-tr
//!
//! Per-file classification results (not CJK, already converted, nothing
//! to restore) are [`Outcome`](crate::state_machine::Outcome)s, not
//! errors. Everything here aborts the run unless the runner is told to
//! keep going.

use crate::scanner::ScanError;
use std::path::PathBuf;
use thiserror::Error;

/// Tag store errors
#[derive(Debug, Error)]
pub enum TagError {
    /// File could not be opened or its tags decoded (corrupt or empty file)
    #[error("Failed to read tags from {path}: {reason}")]
    Read { path: PathBuf, reason: String },

    /// Pending changes could not be saved
    #[error("Failed to write tags to {path}: {reason}")]
    Write { path: PathBuf, reason: String },

    /// Field name outside the supported set
    #[error("Unknown tag field: {0}")]
    UnknownField(String),
}

impl TagError {
    pub fn read(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        TagError::Read {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub fn write(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        TagError::Write {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

/// Run-level errors returned by [`Runner`](crate::runner::Runner)
#[derive(Debug, Error)]
pub enum RunError {
    /// Directory traversal failed before any file was processed
    #[error(transparent)]
    Scan(#[from] ScanError),

    /// A file's tags could not be read or saved
    #[error("Failed to handle file '{path}': {source}")]
    Tag {
        path: PathBuf,
        #[source]
        source: TagError,
    },

    /// Report output could not be written
    #[error("Report output error: {0}")]
    Output(#[from] std::io::Error),
}

/// Result type for run operations
pub type RunResult<T> = Result<T, RunError>;
