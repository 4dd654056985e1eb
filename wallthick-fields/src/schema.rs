//! The ordered set of field definitions every record follows.
//!
//! Field order is significant: it is the on-disk column order of the record
//! file. Build the schema once with [`FieldSchema::builder`] (or use
//! [`pipeline_schema`]) and share it behind an `Arc`.

use indexmap::IndexMap;
use tracing::debug;

use crate::error::{FieldsError, Result};
use crate::types::{FieldKind, FieldSpec};

/// Builder for `FieldSchema`. Created by `FieldSchema::builder()`.
#[derive(Debug, Default)]
pub struct FieldSchemaBuilder {
    fields: Vec<FieldSpec>,
}

impl FieldSchemaBuilder {
    /// Append a field. Order of calls is the column order.
    pub fn field(mut self, spec: FieldSpec) -> Self {
        self.fields.push(spec);
        self
    }

    /// Check names and bounds, then freeze the schema.
    pub fn build(self) -> Result<FieldSchema> {
        let mut fields = IndexMap::with_capacity(self.fields.len());
        for spec in self.fields {
            if let FieldKind::Decimal {
                min: Some(min),
                max: Some(max),
                ..
            } = spec.kind
            {
                if min > max {
                    return Err(FieldsError::InvalidBounds {
                        name: spec.name,
                        min,
                        max,
                    });
                }
            }
            if fields.contains_key(&spec.name) {
                return Err(FieldsError::DuplicateField { name: spec.name });
            }
            fields.insert(spec.name.clone(), spec);
        }

        debug!(fields = fields.len(), "field schema built");
        Ok(FieldSchema { fields })
    }
}

/// Ordered mapping of field name to [`FieldSpec`]. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSchema {
    fields: IndexMap<String, FieldSpec>,
}

impl FieldSchema {
    pub fn builder() -> FieldSchemaBuilder {
        FieldSchemaBuilder::default()
    }

    /// Get a field spec by name.
    pub fn get(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Field names in column order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Field specs in column order.
    pub fn iter(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.values()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// The built-in pipeline wall thickness schema.
///
/// General information (project, originator, checker and their dates),
/// pipe dimensions in mm and %, and material properties.
pub fn pipeline_schema() -> Result<FieldSchema> {
    FieldSchema::builder()
        .field(FieldSpec::string("Project"))
        .field(FieldSpec::string("Originator").required())
        .field(FieldSpec::date("Date").required())
        .field(FieldSpec::string("Checker").required())
        .field(FieldSpec::date("CheckDate").required())
        .field(FieldSpec::decimal("D_o", 0.0, 1000.0).step(0.01).required())
        .field(FieldSpec::decimal("t_sel", 0.0, 1000.0).step(0.01).required())
        .field(FieldSpec::decimal("t_cor", 0.0, 1000.0).step(0.01))
        .field(FieldSpec::decimal("tol", 0.0, 100.0).step(0.01))
        .field(FieldSpec::decimal("B", 0.0, 100.0).step(0.01))
        .field(FieldSpec::decimal("SMYS", 0.0, 100_000.0).step(0.01).required())
        .field(FieldSpec::decimal("E", 0.0, 100_000.0).step(0.01).required())
        .field(FieldSpec::decimal("v", 0.0, 1.0).step(0.01).required())
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pipeline_schema_column_order() {
        let schema = pipeline_schema().unwrap();
        let names: Vec<&str> = schema.names().collect();
        assert_eq!(
            names,
            vec![
                "Project",
                "Originator",
                "Date",
                "Checker",
                "CheckDate",
                "D_o",
                "t_sel",
                "t_cor",
                "tol",
                "B",
                "SMYS",
                "E",
                "v"
            ]
        );
    }

    #[test]
    fn pipeline_schema_constraints() {
        let schema = pipeline_schema().unwrap();
        assert!(!schema.get("Project").unwrap().required);
        assert!(schema.get("Originator").unwrap().required);
        assert_eq!(schema.get("Date").unwrap().kind, FieldKind::IsoDate);

        let v = schema.get("v").unwrap();
        assert_eq!(v.min(), Some(0.0));
        assert_eq!(v.max(), Some(1.0));
        assert_eq!(v.step_hint(), Some(0.01));
        assert_eq!(schema.get("SMYS").unwrap().max(), Some(100_000.0));
    }

    #[test]
    fn duplicate_names_rejected() {
        let err = FieldSchema::builder()
            .field(FieldSpec::string("Project"))
            .field(FieldSpec::date("Project"))
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            FieldsError::DuplicateField {
                name: "Project".into()
            }
        );
    }

    #[test]
    fn inverted_bounds_rejected() {
        let err = FieldSchema::builder()
            .field(FieldSpec::decimal("tol", 100.0, 0.0))
            .build()
            .unwrap_err();
        assert!(matches!(err, FieldsError::InvalidBounds { ref name, .. } if name == "tol"));
    }

    #[test]
    fn empty_schema_is_allowed() {
        let schema = FieldSchema::builder().build().unwrap();
        assert!(schema.is_empty());
        assert_eq!(schema.len(), 0);
    }
}
