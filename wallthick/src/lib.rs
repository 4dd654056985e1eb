//! # `wallthick`
//!
//! Data entry core for subsea pipeline wall thickness calculations.
//!
//! ## Features
//!
//! - **Field schema**: the ordered, typed set of inputs every calculation record carries
//! - **Validation**: per-field checks with all failures reported together
//! - **Record store**: list, get, append and update records in a CSV file
//! - **Settings**: typed user preferences persisted as JSON in the home directory
//! - **Session**: the form workflow tying the above together
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chrono::Local;
//! use wallthick::{Session, SettingsStore};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let today = Local::now().date_naive();
//! let settings = SettingsStore::open_default()?;
//! let mut session = Session::open_pipeline(".", today, settings)?;
//!
//! let mut form = session.next_form(today);
//! form.insert("Originator".into(), "Bob".into());
//! // ... the remaining fields from the UI ...
//!
//! match session.submit(&form) {
//!     Ok(_) => println!("{}", session.status()),
//!     Err(e) => eprintln!("{e}"),
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

/// Session errors
pub mod error;

/// Form workflow over the schema, record store and settings
pub mod session;

pub use error::{Result, SessionError};
pub use session::Session;

pub use wallthick_common::{init_logging, ErrorSeverity, Severity};
pub use wallthick_fields::{
    pipeline_schema, FieldError, FieldErrors, FieldKind, FieldSchema, FieldSpec, FieldValue,
    Record, Validator,
};
pub use wallthick_settings::{SettingType, SettingValue, SettingsStore};
pub use wallthick_store::{dated_file_name, RecordStore, StoreError};
