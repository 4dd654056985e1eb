//! # Wall Thickness Settings
//!
//! A small typed key-value store for user preferences, persisted as one JSON
//! object mapping each key to `{ "type": ..., "value": ... }`.
//!
//! - The set of keys and their types is fixed when the store is created
//!   ([`defaults`]); unknown keys in the file are ignored
//! - Loading is tolerant: a bad entry leaves that key at its default
//! - `set` only changes memory; call `save` to persist
//!
//! ```rust,no_run
//! use wallthick_settings::{defaults::AUTOFILL_DATE, SettingValue, SettingsStore};
//!
//! # fn example() -> wallthick_settings::Result<()> {
//! let mut settings = SettingsStore::open_default()?;
//! if settings.get_bool(AUTOFILL_DATE) == Some(true) {
//!     // fill today's date into the form
//! }
//! settings.set(AUTOFILL_DATE, SettingValue::Bool(false))?;
//! settings.save()?;
//! # Ok(())
//! # }
//! ```

pub mod defaults;
pub mod error;
pub mod store;
pub mod types;

pub use error::{Result, SettingsError};
pub use store::{default_settings_path, SettingsStore, SETTINGS_PATH_ENV};
pub use types::{SettingType, SettingValue};
