//! Error types for the field schema and validator

use indexmap::IndexMap;
use thiserror::Error;
use wallthick_common::{ErrorSeverity, Severity};

/// Result type for schema construction
pub type Result<T> = std::result::Result<T, FieldsError>;

/// Errors raised while building a [`crate::FieldSchema`]
#[derive(Debug, Error, PartialEq)]
pub enum FieldsError {
    /// Two field specs share a name
    #[error("duplicate field name: {name}")]
    DuplicateField { name: String },

    /// Decimal field with `min` greater than `max`
    #[error("invalid bounds on field '{name}': min {min} is greater than max {max}")]
    InvalidBounds { name: String, min: f64, max: f64 },
}

impl Severity for FieldsError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Error
    }
}

/// A single field-level validation failure
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FieldError {
    #[error("{field} is required")]
    MissingRequired { field: String },

    #[error("{field}: '{value}' is not a valid YYYY-MM-DD date")]
    InvalidDate { field: String, value: String },

    #[error("{field}: '{value}' is not a number")]
    InvalidDecimal { field: String, value: String },

    #[error("{field}: {value} is outside the range {}..={}", fmt_bound(.min), fmt_bound(.max))]
    OutOfRange {
        field: String,
        value: f64,
        min: Option<f64>,
        max: Option<f64>,
    },

    #[error("unknown field: {field}")]
    UnknownField { field: String },
}

fn fmt_bound(bound: &Option<f64>) -> String {
    bound.map(|b| b.to_string()).unwrap_or_default()
}

impl FieldError {
    /// Name of the field this error belongs to.
    pub fn field(&self) -> &str {
        match self {
            FieldError::MissingRequired { field }
            | FieldError::InvalidDate { field, .. }
            | FieldError::InvalidDecimal { field, .. }
            | FieldError::OutOfRange { field, .. }
            | FieldError::UnknownField { field } => field,
        }
    }
}

impl Severity for FieldError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            // Caller bug, not user input
            FieldError::UnknownField { .. } => ErrorSeverity::Error,
            _ => ErrorSeverity::Warning,
        }
    }
}

/// Every failing field of a form, keyed by field name in schema order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldErrors {
    errors: IndexMap<String, FieldError>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error; a later error for the same field replaces the earlier one.
    pub fn push(&mut self, error: FieldError) {
        self.errors.insert(error.field().to_string(), error);
    }

    pub fn get(&self, field: &str) -> Option<&FieldError> {
        self.errors.get(field)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Names of the failing fields, in schema order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.errors.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldError)> {
        self.errors.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.field_names().collect();
        write!(f, "error in fields: {}", names.join(", "))
    }
}

impl std::error::Error for FieldErrors {}

impl Severity for FieldErrors {
    fn severity(&self) -> ErrorSeverity {
        self.errors
            .values()
            .map(Severity::severity)
            .max()
            .unwrap_or(ErrorSeverity::Warning)
    }
}
