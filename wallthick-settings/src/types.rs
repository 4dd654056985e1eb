//! Setting types and values

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Declared type of a setting, as written in the `type` field of the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SettingType {
    Bool,
    Str,
    Int,
    Float,
}

impl std::fmt::Display for SettingType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SettingType::Bool => "bool",
            SettingType::Str => "str",
            SettingType::Int => "int",
            SettingType::Float => "float",
        };
        f.write_str(name)
    }
}

/// A typed setting value.
#[derive(Debug, Clone, PartialEq)]
pub enum SettingValue {
    Bool(bool),
    Str(String),
    Int(i64),
    Float(f64),
}

impl SettingValue {
    pub fn setting_type(&self) -> SettingType {
        match self {
            SettingValue::Bool(_) => SettingType::Bool,
            SettingValue::Str(_) => SettingType::Str,
            SettingValue::Int(_) => SettingType::Int,
            SettingValue::Float(_) => SettingType::Float,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            SettingValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            SettingValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            SettingValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            SettingValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Read a JSON value as `ty`. Whole numbers are accepted for `float`.
    pub fn from_json(ty: SettingType, value: &Value) -> Option<Self> {
        match ty {
            SettingType::Bool => value.as_bool().map(SettingValue::Bool),
            SettingType::Str => value.as_str().map(|s| SettingValue::Str(s.to_string())),
            SettingType::Int => value.as_i64().map(SettingValue::Int),
            SettingType::Float => value.as_f64().map(SettingValue::Float),
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            SettingValue::Bool(b) => Value::from(*b),
            SettingValue::Str(s) => Value::from(s.as_str()),
            SettingValue::Int(i) => Value::from(*i),
            SettingValue::Float(f) => Value::from(*f),
        }
    }
}

impl From<bool> for SettingValue {
    fn from(value: bool) -> Self {
        SettingValue::Bool(value)
    }
}

impl From<&str> for SettingValue {
    fn from(value: &str) -> Self {
        SettingValue::Str(value.to_string())
    }
}

impl From<String> for SettingValue {
    fn from(value: String) -> Self {
        SettingValue::Str(value)
    }
}

impl From<i64> for SettingValue {
    fn from(value: i64) -> Self {
        SettingValue::Int(value)
    }
}

impl From<f64> for SettingValue {
    fn from(value: f64) -> Self {
        SettingValue::Float(value)
    }
}

/// On-disk form of one entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct StoredEntry {
    #[serde(rename = "type")]
    pub type_: SettingType,
    pub value: Value,
}
