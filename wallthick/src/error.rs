use thiserror::Error;
use wallthick_common::{ErrorSeverity, Severity};
use wallthick_fields::{FieldErrors, FieldsError};
use wallthick_settings::SettingsError;
use wallthick_store::StoreError;

/// Result type for session operations
pub type Result<T> = std::result::Result<T, SessionError>;

/// Errors surfaced to the form layer
#[derive(Debug, Error)]
pub enum SessionError {
    /// One or more form fields failed validation
    #[error("Cannot calculate, {0}")]
    InvalidFields(FieldErrors),

    /// The schema itself is invalid
    #[error("Schema error: {0}")]
    Schema(#[from] FieldsError),

    /// Record file failure
    #[error("Record store error: {0}")]
    Store(#[from] StoreError),

    /// Settings file failure
    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),
}

impl From<FieldErrors> for SessionError {
    fn from(errors: FieldErrors) -> Self {
        SessionError::InvalidFields(errors)
    }
}

impl Severity for SessionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            SessionError::InvalidFields(errors) => errors.severity(),
            SessionError::Schema(err) => err.severity(),
            SessionError::Store(err) => err.severity(),
            SessionError::Settings(err) => err.severity(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wallthick_fields::FieldError;

    #[test]
    fn test_invalid_fields_message() {
        let mut errors = FieldErrors::new();
        errors.push(FieldError::MissingRequired {
            field: "Originator".into(),
        });
        errors.push(FieldError::MissingRequired { field: "E".into() });

        let err = SessionError::from(errors);
        assert_eq!(
            err.to_string(),
            "Cannot calculate, error in fields: Originator, E"
        );
        assert_eq!(err.severity(), ErrorSeverity::Warning);
    }

    #[test]
    fn test_store_severity_delegates() {
        let err = SessionError::from(StoreError::IndexOutOfRange { index: 0, len: 0 });
        assert_eq!(err.severity(), ErrorSeverity::Error);
    }
}
