//! Typed preferences backed by a JSON file.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde_json::Value;
use tracing::{debug, warn};

use crate::defaults;
use crate::error::{Result, SettingsError};
use crate::types::{SettingType, SettingValue, StoredEntry};

/// Environment variable overriding the settings file location.
pub const SETTINGS_PATH_ENV: &str = "WALLTHICK_SETTINGS";

/// File name of the settings dot-file in the home directory.
const SETTINGS_FILE_NAME: &str = ".wallthick_settings.json";

/// Where settings live unless the caller says otherwise.
///
/// `$WALLTHICK_SETTINGS` if set and non-empty, else `~/.wallthick_settings.json`.
pub fn default_settings_path() -> Result<PathBuf> {
    if let Some(path) = std::env::var_os(SETTINGS_PATH_ENV).filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(path));
    }
    let home = dirs::home_dir().ok_or(SettingsError::HomeDirectoryNotFound)?;
    Ok(home.join(SETTINGS_FILE_NAME))
}

/// Typed key-value preferences with a fixed key set.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
    values: IndexMap<String, SettingValue>,
}

impl SettingsStore {
    /// Open the store at `path` with the built-in keys, loading the file if present.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        Self::open_with(path, defaults::values())
    }

    /// Open the store at the default location.
    pub fn open_default() -> Result<Self> {
        Self::open(default_settings_path()?)
    }

    /// Open the store with a caller-supplied key set and defaults.
    pub fn open_with<I, K>(path: impl Into<PathBuf>, defaults: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, SettingValue)>,
        K: Into<String>,
    {
        let mut store = Self {
            path: path.into(),
            values: defaults.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        };
        store.load()?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Known keys, in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Declared type of a known key.
    pub fn setting_type(&self, key: &str) -> Option<SettingType> {
        self.values.get(key).map(SettingValue::setting_type)
    }

    /// Current value of a known key.
    pub fn get(&self, key: &str) -> Option<&SettingValue> {
        self.values.get(key)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(SettingValue::as_bool)
    }

    /// Change a value in memory. Nothing is written until [`SettingsStore::save`].
    ///
    /// NaN and infinite floats are rejected since JSON has no encoding for them.
    pub fn set(&mut self, key: &str, value: impl Into<SettingValue>) -> Result<()> {
        let value = value.into();
        let current = self
            .values
            .get_mut(key)
            .ok_or_else(|| SettingsError::UnknownKey {
                key: key.to_string(),
            })?;

        let expected = current.setting_type();
        let actual = value.setting_type();
        if expected != actual {
            return Err(SettingsError::TypeMismatch {
                key: key.to_string(),
                expected,
                actual,
            });
        }
        if let SettingValue::Float(f) = value {
            if !f.is_finite() {
                return Err(SettingsError::NonFiniteFloat {
                    key: key.to_string(),
                    value: f,
                });
            }
        }

        debug!(key, ?value, "setting changed");
        *current = value;
        Ok(())
    }

    /// Re-read the file over the current values.
    ///
    /// A missing file changes nothing. Unknown keys are ignored, and an entry
    /// whose `type` disagrees with the declared type or whose `value` does not
    /// fit it is skipped. A file that is not a JSON object is ignored
    /// entirely. Only I/O failures are returned.
    pub fn load(&mut self) -> Result<()> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no settings file, using defaults");
                return Ok(());
            }
            Err(source) => {
                return Err(SettingsError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let raw: IndexMap<String, Value> = match serde_json::from_str(&content) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(path = %self.path.display(), %e, "ignoring unreadable settings file");
                return Ok(());
            }
        };

        for (key, current) in self.values.iter_mut() {
            let Some(entry) = raw.get(key) else {
                continue;
            };
            match read_entry(current.setting_type(), entry) {
                Some(value) => *current = value,
                None => warn!(key = %key, "skipping invalid settings entry"),
            }
        }

        debug!(path = %self.path.display(), "settings loaded");
        Ok(())
    }

    /// Write every known entry to the file, replacing its contents.
    pub fn save(&self) -> Result<()> {
        let stored: IndexMap<&str, StoredEntry> = self
            .values
            .iter()
            .map(|(key, value)| {
                (
                    key.as_str(),
                    StoredEntry {
                        type_: value.setting_type(),
                        value: value.to_json(),
                    },
                )
            })
            .collect();
        let json = serde_json::to_string_pretty(&stored)?;

        fs::write(&self.path, json).map_err(|source| SettingsError::Io {
            path: self.path.clone(),
            source,
        })?;
        debug!(path = %self.path.display(), "settings saved");
        Ok(())
    }
}

/// Decode one `{type, value}` entry as `declared`, or `None` if it does not fit.
fn read_entry(declared: SettingType, entry: &Value) -> Option<SettingValue> {
    let object = entry.as_object()?;
    if let Some(ty) = object.get("type") {
        let stored: SettingType = serde_json::from_value(ty.clone()).ok()?;
        if stored != declared {
            return None;
        }
    }
    SettingValue::from_json(declared, object.get("value")?)
}
