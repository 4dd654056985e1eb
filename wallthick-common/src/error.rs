//! Severity classification shared by all wall thickness error types.

use std::fmt;

/// Severity levels for error classification
///
/// - **Warning**: the input was rejected but nothing on disk is affected.
///   Field validation failures land here; the user fixes the form and retries.
/// - **Error**: the operation failed and the store is unusable for it, but the
///   process continues (bad header, index out of range, unknown setting).
/// - **Critical**: the filesystem itself failed underneath an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    /// Potential issue but operation can proceed
    Warning,
    /// Operation failed but system can continue
    Error,
    /// System cannot continue, requires immediate attention
    Critical,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorSeverity::Warning => write!(f, "warning"),
            ErrorSeverity::Error => write!(f, "error"),
            ErrorSeverity::Critical => write!(f, "critical"),
        }
    }
}

/// Trait for error types that have severity levels
///
/// ```rust
/// use wallthick_common::{ErrorSeverity, Severity};
///
/// #[derive(Debug)]
/// enum MyError {
///     DiskGone,
///     BadHeader,
///     EmptyField,
/// }
///
/// impl Severity for MyError {
///     fn severity(&self) -> ErrorSeverity {
///         match self {
///             MyError::DiskGone => ErrorSeverity::Critical,
///             MyError::BadHeader => ErrorSeverity::Error,
///             MyError::EmptyField => ErrorSeverity::Warning,
///         }
///     }
/// }
///
/// assert_eq!(MyError::BadHeader.severity(), ErrorSeverity::Error);
/// ```
pub trait Severity {
    /// Get the severity level of this error
    fn severity(&self) -> ErrorSeverity;
}
