//! Common error types for romatag

use std::path::PathBuf;
use thiserror::Error;

/// Common result type for romatag operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the romatag crates
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file exists but could not be parsed
    #[error("Invalid config file {path}: {reason}")]
    ConfigParse { path: PathBuf, reason: String },

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid user input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
