//! Error types for the settings store

use std::path::PathBuf;
use thiserror::Error;
use wallthick_common::{ErrorSeverity, Severity};

use crate::types::SettingType;

/// Result type for settings operations
pub type Result<T> = std::result::Result<T, SettingsError>;

/// Settings-related errors
#[derive(Error, Debug)]
pub enum SettingsError {
    /// Failed to read or write the settings file
    #[error("Failed to access settings file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to serialize settings
    #[error("Failed to serialize settings: {0}")]
    Json(#[from] serde_json::Error),

    /// Key is not a declared setting
    #[error("Unknown setting: {key}")]
    UnknownKey { key: String },

    /// Value type differs from the declared type
    #[error("Setting '{key}' expects a {expected} value, got {actual}")]
    TypeMismatch {
        key: String,
        expected: SettingType,
        actual: SettingType,
    },

    /// Float value that JSON cannot represent
    #[error("Setting '{key}' must be a finite number, got {value}")]
    NonFiniteFloat { key: String, value: f64 },

    /// Home directory could not be determined
    #[error("Unable to determine home directory")]
    HomeDirectoryNotFound,
}

impl Severity for SettingsError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            SettingsError::Io { .. } => ErrorSeverity::Critical,
            SettingsError::Json(_) => ErrorSeverity::Error,
            SettingsError::UnknownKey { .. } => ErrorSeverity::Error,
            SettingsError::TypeMismatch { .. } => ErrorSeverity::Error,
            SettingsError::NonFiniteFloat { .. } => ErrorSeverity::Error,
            SettingsError::HomeDirectoryNotFound => ErrorSeverity::Error,
        }
    }
}
