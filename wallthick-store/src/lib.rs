//! Record store for wall thickness calculation inputs
//!
//! Records live as rows of a comma-separated file: one header row naming the
//! schema fields in order, then one row per record. A record's identity is its
//! 0-based row index.
//!
//! ## Features
//!
//! - **Append-only inserts**: `insert` never rewrites existing rows
//! - **Whole-record updates**: `update` replaces one row and rewrites the file
//!   through a temporary file in the same directory
//! - **Header checking**: every read verifies the header carries every schema
//!   field before any row is returned
//! - **No cache**: every call goes back to the file, so swapping the path with
//!   `set_path` carries nothing over
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use wallthick_fields::{pipeline_schema, Validator};
//! use wallthick_store::RecordStore;
//!
//! # fn example(form: std::collections::HashMap<String, String>) -> Result<(), Box<dyn std::error::Error>> {
//! let schema = Arc::new(pipeline_schema()?);
//! let validator = Validator::new(schema.clone());
//! let store = RecordStore::new(schema, "wt_data_2024-01-01.csv");
//!
//! let record = validator.validate_all(&form)?;
//! store.insert(&record)?;
//!
//! for (index, record) in store.list_all()?.iter().enumerate() {
//!     println!("{index}: {:?}", record.text("Project"));
//! }
//! # Ok(())
//! # }
//! ```

mod csv;
mod error;
mod store;

pub use error::{Result, StoreError};
pub use store::{dated_file_name, RecordStore};
