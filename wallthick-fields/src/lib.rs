//! Field schema and validation for wall thickness records
//!
//! `wallthick-fields` owns the description of a record (which columns exist, in
//! which order, what kind of value each holds) and the rules that turn raw form
//! text into typed values. It knows nothing about files; the record store and
//! any UI consume it.
//!
//! # Architecture
//!
//! - **Build once, share everywhere**: a [`FieldSchema`] is constructed at startup
//!   and handed out as `Arc<FieldSchema>`, so every consumer sees the same order
//!   and constraints
//! - **Tagged values**: [`FieldValue`] carries the kind of each value while keeping
//!   the text form that goes on disk
//! - **Errors as data**: [`Validator`] returns per-field errors so callers can
//!   aggregate them before reporting

pub mod error;
pub mod schema;
pub mod types;
pub mod validation;

pub use error::{FieldError, FieldErrors, FieldsError, Result};
pub use schema::{pipeline_schema, FieldSchema, FieldSchemaBuilder};
pub use types::{is_truthy, FieldKind, FieldSpec, FieldValue, Record};
pub use validation::Validator;
