//! Validation of raw form text against the field schema.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::debug;

use crate::error::{FieldError, FieldErrors};
use crate::schema::FieldSchema;
use crate::types::{is_truthy, FieldKind, FieldSpec, FieldValue, Record, DATE_FORMAT};

/// Turns raw per-field strings into typed [`FieldValue`]s.
///
/// Stateless apart from the shared schema; every method is a pure function of
/// its input.
#[derive(Debug, Clone)]
pub struct Validator {
    schema: Arc<FieldSchema>,
}

impl Validator {
    pub fn new(schema: Arc<FieldSchema>) -> Self {
        Self { schema }
    }

    pub fn schema(&self) -> &Arc<FieldSchema> {
        &self.schema
    }

    /// Validate one field.
    ///
    /// Blank input (empty or whitespace only) is `MissingRequired` for a
    /// required field and a valid empty value otherwise. The raw text is kept
    /// as-is in the returned value.
    pub fn validate(&self, field: &str, raw: &str) -> Result<FieldValue, FieldError> {
        let spec = self
            .schema
            .get(field)
            .ok_or_else(|| FieldError::UnknownField {
                field: field.to_string(),
            })?;
        validate_spec(spec, raw)
    }

    /// Validate a whole form.
    ///
    /// Every schema field is checked, a missing entry counting as blank, and all
    /// failures are collected. Entries for names outside the schema are
    /// reported as `UnknownField`.
    pub fn validate_all(&self, raw: &HashMap<String, String>) -> Result<Record, FieldErrors> {
        let mut record = Record::new();
        let mut errors = FieldErrors::new();

        for spec in self.schema.iter() {
            let text = raw.get(&spec.name).map(String::as_str).unwrap_or("");
            match validate_spec(spec, text) {
                Ok(value) => {
                    record.insert(spec.name.clone(), value);
                }
                Err(e) => errors.push(e),
            }
        }

        let mut unknown: Vec<&String> = raw.keys().filter(|k| !self.schema.contains(k)).collect();
        unknown.sort();
        for name in unknown {
            errors.push(FieldError::UnknownField {
                field: name.clone(),
            });
        }

        if errors.is_empty() {
            Ok(record)
        } else {
            debug!(failed = errors.len(), "form rejected");
            Err(errors)
        }
    }
}

fn validate_spec(spec: &FieldSpec, raw: &str) -> Result<FieldValue, FieldError> {
    let blank = raw.trim().is_empty();
    if blank && spec.required && spec.kind != FieldKind::Boolean {
        return Err(FieldError::MissingRequired {
            field: spec.name.clone(),
        });
    }

    match &spec.kind {
        FieldKind::String => Ok(FieldValue::Text(raw.to_string())),
        FieldKind::IsoDate => {
            if !blank && parse_iso_date(raw).is_none() {
                return Err(FieldError::InvalidDate {
                    field: spec.name.clone(),
                    value: raw.to_string(),
                });
            }
            Ok(FieldValue::Date(raw.to_string()))
        }
        FieldKind::Decimal { min, max, .. } => {
            if !blank {
                let value = raw
                    .trim()
                    .parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .ok_or_else(|| FieldError::InvalidDecimal {
                        field: spec.name.clone(),
                        value: raw.to_string(),
                    })?;
                let below = min.is_some_and(|m| value < m);
                let above = max.is_some_and(|m| value > m);
                if below || above {
                    return Err(FieldError::OutOfRange {
                        field: spec.name.clone(),
                        value,
                        min: *min,
                        max: *max,
                    });
                }
            }
            Ok(FieldValue::Decimal(raw.to_string()))
        }
        FieldKind::Boolean => Ok(FieldValue::Boolean(is_truthy(raw.trim()))),
    }
}

/// Strict `YYYY-MM-DD`: chrono alone would accept unpadded months and days.
fn parse_iso_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.len() != 10 {
        return None;
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT).ok()
}
