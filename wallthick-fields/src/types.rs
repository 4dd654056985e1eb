//! Core field and record types.
//!
//! A [`FieldSpec`] describes one named column. A [`FieldValue`] is the typed
//! content of one cell; it keeps the exact text the user entered for every
//! kind except booleans, so the on-disk form never drifts from the input.

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Format of every date field, both on disk and in forms.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// The kind of a field, which determines the shape of its value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum FieldKind {
    String,
    IsoDate,
    Decimal {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<f64>,
        /// Input stepper increment. Never checked on save.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        step_hint: Option<f64>,
    },
    Boolean,
}

impl FieldKind {
    /// Short lowercase name used in messages.
    pub fn name(&self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::IsoDate => "isoDate",
            FieldKind::Decimal { .. } => "decimal",
            FieldKind::Boolean => "boolean",
        }
    }
}

/// Definition of a single named column.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldSpec {
    pub name: String,
    #[serde(default)]
    pub required: bool,
    #[serde(flatten)]
    pub kind: FieldKind,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            required: false,
            kind,
        }
    }

    pub fn string(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::String)
    }

    pub fn date(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::IsoDate)
    }

    pub fn boolean(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Boolean)
    }

    /// Decimal field bounded by `min..=max`.
    pub fn decimal(name: impl Into<String>, min: f64, max: f64) -> Self {
        Self::new(
            name,
            FieldKind::Decimal {
                min: Some(min),
                max: Some(max),
                step_hint: None,
            },
        )
    }

    /// Mark the field as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Attach a stepper increment to a decimal field. No effect on other kinds.
    pub fn step(mut self, step: f64) -> Self {
        if let FieldKind::Decimal { step_hint, .. } = &mut self.kind {
            *step_hint = Some(step);
        }
        self
    }

    pub fn min(&self) -> Option<f64> {
        match self.kind {
            FieldKind::Decimal { min, .. } => min,
            _ => None,
        }
    }

    pub fn max(&self) -> Option<f64> {
        match self.kind {
            FieldKind::Decimal { max, .. } => max,
            _ => None,
        }
    }

    pub fn step_hint(&self) -> Option<f64> {
        match self.kind {
            FieldKind::Decimal { step_hint, .. } => step_hint,
            _ => None,
        }
    }
}

/// Truth rule for boolean cells read back from disk.
///
/// `true`, `yes` and `1` (any case) are true; everything else, including the
/// empty string, is false.
pub fn is_truthy(raw: &str) -> bool {
    matches!(raw.to_lowercase().as_str(), "true" | "yes" | "1")
}

/// Typed content of one record cell.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum FieldValue {
    Text(String),
    /// Raw `YYYY-MM-DD` text, or empty for an optional date left blank.
    Date(String),
    /// Raw numeric text, or empty for an optional decimal left blank.
    Decimal(String),
    Boolean(bool),
}

impl FieldValue {
    /// Build a value from a cell read off disk. Only booleans are coerced.
    pub fn from_cell(kind: &FieldKind, raw: &str) -> Self {
        match kind {
            FieldKind::String => FieldValue::Text(raw.to_string()),
            FieldKind::IsoDate => FieldValue::Date(raw.to_string()),
            FieldKind::Decimal { .. } => FieldValue::Decimal(raw.to_string()),
            FieldKind::Boolean => FieldValue::Boolean(is_truthy(raw)),
        }
    }

    /// Text written to disk. Booleans use the capitalized `True`/`False` form
    /// existing data files already contain.
    pub fn to_cell(&self) -> String {
        match self {
            FieldValue::Text(s) | FieldValue::Date(s) | FieldValue::Decimal(s) => s.clone(),
            FieldValue::Boolean(true) => "True".to_string(),
            FieldValue::Boolean(false) => "False".to_string(),
        }
    }

    /// Whether this variant is the one `kind` produces.
    pub fn matches(&self, kind: &FieldKind) -> bool {
        matches!(
            (self, kind),
            (FieldValue::Text(_), FieldKind::String)
                | (FieldValue::Date(_), FieldKind::IsoDate)
                | (FieldValue::Decimal(_), FieldKind::Decimal { .. })
                | (FieldValue::Boolean(_), FieldKind::Boolean)
        )
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) | FieldValue::Date(s) | FieldValue::Decimal(s) => Some(s),
            FieldValue::Boolean(_) => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            FieldValue::Date(s) => NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).ok(),
            _ => None,
        }
    }

    pub fn as_decimal(&self) -> Option<f64> {
        match self {
            FieldValue::Decimal(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }
}

/// One row of user-entered data keyed by field name.
///
/// Iteration follows insertion order; values produced by the validator or the
/// record store are always in schema order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Record {
    values: IndexMap<String, FieldValue>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field, returning the previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: FieldValue) -> Option<FieldValue> {
        self.values.insert(name.into(), value)
    }

    /// Builder-style [`Record::insert`].
    pub fn with(mut self, name: impl Into<String>, value: FieldValue) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    /// Text of a non-boolean field.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(FieldValue::as_text)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl FromIterator<(String, FieldValue)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, FieldValue)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boolean_cells_write_capitalized() {
        assert_eq!(FieldValue::Boolean(true).to_cell(), "True");
        assert_eq!(FieldValue::Boolean(false).to_cell(), "False");
    }

    #[test]
    fn capitalized_boolean_reads_back_true() {
        let written = FieldValue::Boolean(true).to_cell();
        assert_eq!(
            FieldValue::from_cell(&FieldKind::Boolean, &written),
            FieldValue::Boolean(true)
        );
    }

    #[test]
    fn non_boolean_cells_are_kept_verbatim() {
        let kind = FieldKind::Decimal {
            min: None,
            max: None,
            step_hint: None,
        };
        let value = FieldValue::from_cell(&kind, "12.50");
        assert_eq!(value, FieldValue::Decimal("12.50".into()));
        assert_eq!(value.to_cell(), "12.50");
        assert_eq!(value.as_decimal(), Some(12.5));
    }

    #[test]
    fn date_value_parses_lazily() {
        let value = FieldValue::Date("2024-01-01".into());
        assert_eq!(value.as_date(), NaiveDate::from_ymd_opt(2024, 1, 1));
        assert_eq!(FieldValue::Date(String::new()).as_date(), None);
    }

    #[test]
    fn matches_checks_variant_against_kind() {
        assert!(FieldValue::Text("x".into()).matches(&FieldKind::String));
        assert!(!FieldValue::Text("x".into()).matches(&FieldKind::IsoDate));
        assert!(FieldValue::Boolean(false).matches(&FieldKind::Boolean));
    }

    #[test]
    fn step_only_applies_to_decimals() {
        let spec = FieldSpec::decimal("D_o", 0.0, 1000.0).step(0.01).required();
        assert_eq!(spec.step_hint(), Some(0.01));
        assert_eq!(spec.min(), Some(0.0));
        assert_eq!(spec.max(), Some(1000.0));
        assert!(spec.required);

        let text = FieldSpec::string("Project").step(0.01);
        assert_eq!(text.step_hint(), None);
        assert_eq!(text.min(), None);
    }

    #[test]
    fn field_spec_json_shape() {
        let spec = FieldSpec::decimal("tol", 0.0, 100.0).step(0.01);
        let json = serde_json::to_value(&spec).unwrap();
        assert_eq!(json["name"], "tol");
        assert_eq!(json["kind"], "decimal");
        assert_eq!(json["max"], 100.0);
        assert_eq!(json["step_hint"], 0.01);

        let parsed: FieldSpec = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, spec);
    }

    #[test]
    fn record_keeps_insertion_order() {
        let record = Record::new()
            .with("Project", FieldValue::Text("A".into()))
            .with("Originator", FieldValue::Text("Bob".into()))
            .with("Date", FieldValue::Date("2024-01-01".into()));
        let names: Vec<&str> = record.names().collect();
        assert_eq!(names, vec!["Project", "Originator", "Date"]);
        assert_eq!(record.text("Originator"), Some("Bob"));
    }
}
