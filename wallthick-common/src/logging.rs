//! Logging utilities
//!
//! Libraries in this workspace only emit `tracing` events. Whatever hosts them
//! (a GUI shell, a CLI, a test harness) calls [`init_logging`] once to install a
//! subscriber.

use serde::Serialize;
use std::fmt::Debug;
use tracing_subscriber::EnvFilter;

/// Install a stderr `fmt` subscriber.
///
/// `RUST_LOG` takes precedence; otherwise `default_directive` (e.g. `"warn"` or
/// `"wallthick_store=debug"`) is used. Returns `false` if a global subscriber
/// was already installed, which makes repeated calls harmless.
pub fn init_logging(default_directive: &str) -> bool {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
}

/// Wrapper for pretty-printing types in logs as JSON
///
/// ```ignore
/// use wallthick_common::Pretty;
/// use tracing::debug;
///
/// debug!("record: {}", Pretty(&record));
/// ```
///
/// Outputs indented JSON with a leading newline. Debug is used as a fallback if
/// serialization fails.
pub struct Pretty<T>(pub T);

impl<T: Serialize + Debug> std::fmt::Display for Pretty<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match serde_json::to_string_pretty(&self.0) {
            Ok(json) => write!(f, "\n{}", json),
            Err(_) => write!(f, "\n{:#?}", self.0),
        }
    }
}

impl<T: Serialize + Debug> std::fmt::Debug for Pretty<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(self, f)
    }
}
