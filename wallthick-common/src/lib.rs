//! # Wall Thickness Common
//!
//! Foundational pieces shared by every crate in the workspace:
//!
//! - [`error`] - `ErrorSeverity` and the `Severity` trait every error enum implements
//! - [`logging`] - tracing subscriber setup and the `Pretty` log formatter

pub mod error;
pub mod logging;

pub use error::{ErrorSeverity, Severity};
pub use logging::{init_logging, Pretty};
