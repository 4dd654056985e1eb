//! Error types for record store operations

use std::path::PathBuf;
use thiserror::Error;
use wallthick_common::{ErrorSeverity, Severity};

/// Result type for record store operations
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur during record store operations
#[derive(Debug, Error)]
pub enum StoreError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The header row lacks one or more schema fields
    #[error("problem reading file {}: missing fields {}", .path.display(), .missing.join(", "))]
    SchemaMismatch { path: PathBuf, missing: Vec<String> },

    /// The file is not well-formed comma-separated text
    #[error("problem reading file {} at line {line}: {message}", .path.display())]
    Malformed {
        path: PathBuf,
        line: usize,
        message: &'static str,
    },

    /// Row index beyond the current row count
    #[error("record index {index} out of range ({len} records)")]
    IndexOutOfRange { index: usize, len: usize },

    /// The record's field names differ from the schema
    #[error("record does not match schema (missing: [{}], unexpected: [{}])", .missing.join(", "), .unexpected.join(", "))]
    RecordShape {
        missing: Vec<String>,
        unexpected: Vec<String>,
    },

    /// A value's variant does not match its field kind
    #[error("field '{field}' expects a {expected} value")]
    KindMismatch {
        field: String,
        expected: &'static str,
    },
}

impl Severity for StoreError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            // Critical: the filesystem failed underneath the store
            StoreError::Io(_) => ErrorSeverity::Critical,

            // Error: the file or the call is wrong, the process carries on
            StoreError::SchemaMismatch { .. } => ErrorSeverity::Error,
            StoreError::Malformed { .. } => ErrorSeverity::Error,
            StoreError::IndexOutOfRange { .. } => ErrorSeverity::Error,
            StoreError::RecordShape { .. } => ErrorSeverity::Error,
            StoreError::KindMismatch { .. } => ErrorSeverity::Error,
        }
    }
}
