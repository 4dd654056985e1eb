//! Storage backend for wall thickness records
//!
//! One comma-separated file per dataset. The header row is the schema field
//! order; each following row is one record.

use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, warn};
use wallthick_common::Pretty;
use wallthick_fields::{FieldSchema, FieldValue, Record};

use crate::csv;
use crate::error::{Result, StoreError};

/// File name for the records entered on `date`: `wt_data_YYYY-MM-DD.csv`.
pub fn dated_file_name(date: NaiveDate) -> String {
    format!("wt_data_{}.csv", date.format("%Y-%m-%d"))
}

/// Storage backend for record operations
#[derive(Debug, Clone)]
pub struct RecordStore {
    schema: Arc<FieldSchema>,
    /// Backing comma-separated file
    path: PathBuf,
}

impl RecordStore {
    /// Create a store over `path`. Nothing is read or created until the first call.
    pub fn new(schema: Arc<FieldSchema>, path: impl Into<PathBuf>) -> Self {
        Self {
            schema,
            path: path.into(),
        }
    }

    pub fn schema(&self) -> &Arc<FieldSchema> {
        &self.schema
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Point the store at another file.
    pub fn set_path(&mut self, path: impl Into<PathBuf>) {
        self.path = path.into();
        debug!(path = %self.path.display(), "record store switched file");
    }

    /// Whether the backing file exists yet.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Read every record, in file order.
    ///
    /// A missing or empty file is an empty store. A header lacking any schema
    /// field fails the whole read with `SchemaMismatch`.
    pub fn list_all(&self) -> Result<Vec<Record>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let rows = csv::parse(&content).map_err(|e| StoreError::Malformed {
            path: self.path.clone(),
            line: e.line,
            message: e.message,
        })?;
        let mut rows = rows.into_iter();
        let Some(header) = rows.next() else {
            return Ok(Vec::new());
        };

        let columns = self.column_positions(&header)?;
        let records: Vec<Record> = rows.map(|row| self.row_to_record(&columns, &row)).collect();

        debug!(
            path = %self.path.display(),
            records = records.len(),
            "records loaded"
        );
        Ok(records)
    }

    /// The record at `index`.
    pub fn get(&self, index: usize) -> Result<Record> {
        let mut records = self.list_all()?;
        let len = records.len();
        if index >= len {
            return Err(StoreError::IndexOutOfRange { index, len });
        }
        Ok(records.swap_remove(index))
    }

    /// Number of records in the file.
    pub fn len(&self) -> Result<usize> {
        Ok(self.list_all()?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Append one record, writing the header first if the file is new.
    pub fn insert(&self, record: &Record) -> Result<()> {
        self.check_record(record)?;

        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&self.path)?;

        let mut out = String::new();
        if file.metadata()?.len() == 0 {
            out.push_str(&csv::encode_row(self.schema.names()));
        } else if !ends_with_newline(&mut file)? {
            out.push_str(csv::TERMINATOR);
        }
        out.push_str(&self.record_to_row(record));
        file.write_all(out.as_bytes())?;

        debug!(path = %self.path.display(), "record appended: {}", Pretty(record));
        Ok(())
    }

    /// Replace the record at `index` and rewrite the file.
    ///
    /// The file is untouched when `index` is out of range or the read fails.
    pub fn update(&self, index: usize, record: &Record) -> Result<()> {
        self.check_record(record)?;

        let mut records = self.list_all()?;
        let len = records.len();
        let slot = records
            .get_mut(index)
            .ok_or(StoreError::IndexOutOfRange { index, len })?;
        *slot = record.clone();

        let mut out = csv::encode_row(self.schema.names());
        for record in &records {
            out.push_str(&self.record_to_row(record));
        }
        self.replace_file(out.as_bytes())?;

        debug!(path = %self.path.display(), index, "record updated");
        Ok(())
    }

    /// Map each schema field to its column, failing on any missing field.
    fn column_positions(&self, header: &[String]) -> Result<Vec<usize>> {
        let by_name: HashMap<&str, usize> = header
            .iter()
            .enumerate()
            .map(|(i, name)| (name.as_str(), i))
            .collect();

        let missing: Vec<String> = self
            .schema
            .names()
            .filter(|name| !by_name.contains_key(name))
            .map(str::to_string)
            .collect();
        if !missing.is_empty() {
            return Err(StoreError::SchemaMismatch {
                path: self.path.clone(),
                missing,
            });
        }

        let extra: Vec<&str> = header
            .iter()
            .map(String::as_str)
            .filter(|name| !self.schema.contains(name))
            .collect();
        if !extra.is_empty() {
            warn!(path = %self.path.display(), ?extra, "ignoring columns not in schema");
        }

        Ok(self
            .schema
            .names()
            .filter_map(|name| by_name.get(name).copied())
            .collect())
    }

    fn row_to_record(&self, columns: &[usize], row: &[String]) -> Record {
        self.schema
            .iter()
            .zip(columns)
            .map(|(spec, &col)| {
                let cell = row.get(col).map(String::as_str).unwrap_or("");
                (spec.name.clone(), FieldValue::from_cell(&spec.kind, cell))
            })
            .collect()
    }

    fn record_to_row(&self, record: &Record) -> String {
        csv::encode_row(
            self.schema
                .names()
                .map(|name| record.get(name).map(FieldValue::to_cell).unwrap_or_default()),
        )
    }

    /// Reject records whose names or value kinds do not fit the schema.
    fn check_record(&self, record: &Record) -> Result<()> {
        let missing: Vec<String> = self
            .schema
            .names()
            .filter(|name| !record.contains(name))
            .map(str::to_string)
            .collect();
        let unexpected: Vec<String> = record
            .names()
            .filter(|name| !self.schema.contains(name))
            .map(str::to_string)
            .collect();
        if !missing.is_empty() || !unexpected.is_empty() {
            return Err(StoreError::RecordShape {
                missing,
                unexpected,
            });
        }

        for spec in self.schema.iter() {
            if let Some(value) = record.get(&spec.name) {
                if !value.matches(&spec.kind) {
                    return Err(StoreError::KindMismatch {
                        field: spec.name.clone(),
                        expected: spec.kind.name(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Write to a temp file in the same directory then rename over the target.
    fn replace_file(&self, data: &[u8]) -> Result<()> {
        let dir = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(data)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}

/// Whether the last byte of a non-empty file is a line feed.
fn ends_with_newline(file: &mut fs::File) -> Result<bool> {
    let mut last = [0u8; 1];
    file.seek(SeekFrom::End(-1))?;
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}
