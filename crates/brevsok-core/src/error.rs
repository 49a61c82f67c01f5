//! Error types for Brevsok core operations.
//!
//! This module defines well-structured error types using `thiserror` for
//! library-level errors, while higher-level code can use `anyhow` for
//! convenient error handling.
//!
//! Almost nothing in the search core itself is fatal: malformed query tokens
//! degrade to free text, unknown query-string keys are ignored, and
//! unparseable dates never exclude a document. The fallible surface is the
//! one-time corpus load and configuration handling.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using BrevsokError
pub type Result<T> = std::result::Result<T, BrevsokError>;

/// Core error types for Brevsok operations.
#[derive(Error, Debug)]
pub enum BrevsokError {
    /// The corpus file is missing or could not be found
    #[error("corpus not found at {path}")]
    CorpusNotFound { path: PathBuf },

    /// The corpus file exists but could not be decoded
    #[error("corpus is malformed: {reason}")]
    CorpusFormat { reason: String },

    /// Configuration file parsing failed
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    /// Generic I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl BrevsokError {
    /// Create a corpus format error
    pub fn corpus_format(reason: impl Into<String>) -> Self {
        BrevsokError::CorpusFormat {
            reason: reason.into(),
        }
    }

    /// Create a configuration error
    pub fn config(reason: impl Into<String>) -> Self {
        BrevsokError::ConfigError {
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for BrevsokError {
    fn from(err: serde_json::Error) -> Self {
        BrevsokError::CorpusFormat {
            reason: err.to_string(),
        }
    }
}
