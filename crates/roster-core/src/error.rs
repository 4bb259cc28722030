//! Error types for stores, record operations, and input validation.
//!
//! Store errors never escape the tolerant `load_or`/`save` paths; they exist
//! so the fallible forms can be tested and logged with a precise cause.

use std::path::PathBuf;

use thiserror::Error;

/// Failures reading or writing a JSON store file.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The file exists but could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file could not be created or written.
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file contents are not valid JSON for the expected shape.
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The in-memory data could not be serialized.
    #[error("failed to serialize data for {}: {source}", .path.display())]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// A record operation was rejected without touching the repository.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("student ID already exists: {0}")]
    DuplicateId(String),

    #[error("student not found: {0}")]
    NotFound(String),
}

/// User input that failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Marks must be a whole number.
    #[error("invalid marks: {0:?} is not a number")]
    InvalidMarks(String),
}
