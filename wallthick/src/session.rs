use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info};
use wallthick_fields::types::DATE_FORMAT;
use wallthick_fields::{pipeline_schema, FieldKind, FieldSchema, Record, Validator};
use wallthick_settings::defaults::{AUTOFILL_DATE, AUTOFILL_SHEET_DATA};
use wallthick_settings::{SettingValue, SettingsStore};
use wallthick_store::{dated_file_name, RecordStore};

use crate::error::{Result, SessionError};

/// Fields carried from one submission into the next blank form.
const SHEET_FIELDS: [&str; 2] = ["Project", "Originator"];

/// Name of the field filled with today's date.
const DATE_FIELD: &str = "Date";

/// One data entry session over a record file.
///
/// Counts the records submitted since it was opened and remembers the last one
/// so a fresh form can carry sheet data forward.
#[derive(Debug)]
pub struct Session {
    validator: Validator,
    records: RecordStore,
    settings: SettingsStore,
    submitted: usize,
    last: Option<Record>,
}

impl Session {
    /// Bundle a validator and record store over `schema` with `settings`.
    pub fn open(
        schema: Arc<FieldSchema>,
        data_path: impl Into<PathBuf>,
        settings: SettingsStore,
    ) -> Self {
        let records = RecordStore::new(schema.clone(), data_path);
        debug!(path = %records.path().display(), "session opened");
        Self {
            validator: Validator::new(schema),
            records,
            settings,
            submitted: 0,
            last: None,
        }
    }

    /// Open a session over the pipeline schema writing to today's dated file
    /// in `data_dir`.
    pub fn open_pipeline(
        data_dir: impl AsRef<Path>,
        today: NaiveDate,
        settings: SettingsStore,
    ) -> Result<Self> {
        let schema = Arc::new(pipeline_schema()?);
        let path = data_dir.as_ref().join(dated_file_name(today));
        Ok(Self::open(schema, path, settings))
    }

    /// The schema shared by the validator and the record store.
    pub fn schema(&self) -> &Arc<FieldSchema> {
        self.validator.schema()
    }

    /// Validator over the session schema.
    pub fn validator(&self) -> &Validator {
        &self.validator
    }

    /// Record store for the current file.
    pub fn records(&self) -> &RecordStore {
        &self.records
    }

    /// Current settings.
    pub fn settings(&self) -> &SettingsStore {
        &self.settings
    }

    /// Records submitted since the session was opened.
    pub fn submitted(&self) -> usize {
        self.submitted
    }

    /// The record most recently submitted in this session.
    pub fn last_submitted(&self) -> Option<&Record> {
        self.last.as_ref()
    }

    /// Raw values for a fresh form, one entry per schema field.
    ///
    /// Everything starts empty. With `autofill date` on, `Date` holds `today`;
    /// with `autofill sheet data` on, `Project` and `Originator` come from
    /// `previous`.
    pub fn blank_form(
        &self,
        today: NaiveDate,
        previous: Option<&Record>,
    ) -> HashMap<String, String> {
        let mut form: HashMap<String, String> = self
            .schema()
            .names()
            .map(|name| (name.to_string(), String::new()))
            .collect();

        if self.settings.get_bool(AUTOFILL_DATE) == Some(true) {
            if let Some(slot) = form.get_mut(DATE_FIELD) {
                *slot = today.format(DATE_FORMAT).to_string();
            }
        }

        if self.settings.get_bool(AUTOFILL_SHEET_DATA) == Some(true) {
            if let Some(previous) = previous {
                for name in SHEET_FIELDS {
                    if let (Some(slot), Some(text)) = (form.get_mut(name), previous.text(name)) {
                        *slot = text.to_string();
                    }
                }
            }
        }

        form
    }

    /// A fresh form seeded from the last submission of this session.
    pub fn next_form(&self, today: NaiveDate) -> HashMap<String, String> {
        self.blank_form(today, self.last.as_ref())
    }

    /// Validate `raw` and append it to the record file.
    ///
    /// Returns the number of records submitted this session, including this one.
    pub fn submit(&mut self, raw: &HashMap<String, String>) -> Result<usize> {
        let record = self.validator.validate_all(raw)?;
        self.records.insert(&record)?;
        self.submitted += 1;
        self.last = Some(record);
        info!(count = self.submitted, "record saved");
        Ok(self.submitted)
    }

    /// Raw form values of the stored record at `index`, for editing.
    pub fn load_form(&self, index: usize) -> Result<HashMap<String, String>> {
        let record = self.records.get(index)?;
        Ok(record
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_cell()))
            .collect())
    }

    /// Validate `raw` and replace the stored record at `index` with it.
    ///
    /// Edits do not count as new submissions.
    pub fn edit(&self, index: usize, raw: &HashMap<String, String>) -> Result<()> {
        let record = self.validator.validate_all(raw)?;
        self.records.update(index, &record)?;
        debug!(index, "record edited");
        Ok(())
    }

    /// Status line summarizing this session's work.
    pub fn status(&self) -> String {
        format!("{} calculations ran this session", self.submitted)
    }

    /// Change a setting and write the settings file.
    pub fn set_setting(&mut self, key: &str, value: impl Into<SettingValue>) -> Result<()> {
        self.settings.set(key, value)?;
        self.settings.save().map_err(SessionError::from)
    }

    /// Point the session at a different record file.
    ///
    /// The submission counter is kept; the file is not read until next use.
    pub fn switch_file(&mut self, path: impl Into<PathBuf>) {
        self.records.set_path(path);
        debug!(path = %self.records.path().display(), "record file switched");
    }

    /// Whether a schema field holds a boolean, which forms render as a checkbox.
    pub fn is_flag(&self, field: &str) -> bool {
        matches!(
            self.schema().get(field).map(|spec| &spec.kind),
            Some(FieldKind::Boolean)
        )
    }
}
