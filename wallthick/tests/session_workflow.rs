//! End-to-end form workflow over the pipeline schema

use std::collections::HashMap;
use std::fs;

use chrono::NaiveDate;
use tempfile::TempDir;
use wallthick::{Session, SessionError, SettingsStore, StoreError};
use wallthick_settings::defaults::AUTOFILL_SHEET_DATA;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
}

fn open(temp_dir: &TempDir) -> Session {
    let settings = SettingsStore::open(temp_dir.path().join("settings.json")).unwrap();
    Session::open_pipeline(temp_dir.path(), today(), settings).unwrap()
}

fn complete(mut form: HashMap<String, String>) -> HashMap<String, String> {
    for (name, value) in [
        ("Project", "Subsea Tieback"),
        ("Originator", "Bob"),
        ("Checker", "Ann"),
        ("CheckDate", "2024-01-16"),
        ("D_o", "273.1"),
        ("t_sel", "12.7"),
        ("SMYS", "450"),
        ("E", "207000"),
        ("v", "0.3"),
    ] {
        form.insert(name.to_string(), value.to_string());
    }
    form
}

#[test]
fn test_session_writes_dated_file() {
    let temp_dir = TempDir::new().unwrap();
    let mut session = open(&temp_dir);
    assert_eq!(
        session.records().path(),
        temp_dir.path().join("wt_data_2024-01-15.csv")
    );

    let form = complete(session.next_form(today()));
    assert_eq!(form["Date"], "2024-01-15");
    // E is above its range.
    let err = session.submit(&form).unwrap_err();
    assert!(matches!(err, SessionError::InvalidFields(ref errors) if errors.len() == 1));
    assert_eq!(err.to_string(), "Cannot calculate, error in fields: E");

    let mut form = form;
    form.insert("E".into(), "2070".into());
    assert_eq!(session.submit(&form).unwrap(), 1);

    let written = fs::read_to_string(session.records().path()).unwrap();
    let mut lines = written.lines();
    assert_eq!(
        lines.next(),
        Some("Project,Originator,Date,Checker,CheckDate,D_o,t_sel,t_cor,tol,B,SMYS,E,v")
    );
    assert_eq!(
        lines.next(),
        Some("Subsea Tieback,Bob,2024-01-15,Ann,2024-01-16,273.1,12.7,,,,450,2070,0.3")
    );
    assert_eq!(lines.next(), None);
}

#[test]
fn test_sheet_data_carries_over_until_disabled() {
    let temp_dir = TempDir::new().unwrap();
    let mut session = open(&temp_dir);

    let mut form = complete(session.next_form(today()));
    form.insert("E".into(), "2070".into());
    session.submit(&form).unwrap();

    let next = session.next_form(today());
    assert_eq!(next["Project"], "Subsea Tieback");
    assert_eq!(next["Originator"], "Bob");
    assert_eq!(next["Checker"], "");

    session.set_setting(AUTOFILL_SHEET_DATA, false).unwrap();
    let next = session.next_form(today());
    assert_eq!(next["Project"], "");

    // The change was persisted.
    let reopened = SettingsStore::open(temp_dir.path().join("settings.json")).unwrap();
    assert_eq!(reopened.get_bool(AUTOFILL_SHEET_DATA), Some(false));
}

#[test]
fn test_edit_replaces_one_record() {
    let temp_dir = TempDir::new().unwrap();
    let mut session = open(&temp_dir);

    let mut form = complete(session.next_form(today()));
    form.insert("E".into(), "2070".into());
    session.submit(&form).unwrap();
    form.insert("Project".into(), "Second".into());
    session.submit(&form).unwrap();

    let mut loaded = session.load_form(0).unwrap();
    assert_eq!(loaded["Project"], "Subsea Tieback");
    loaded.insert("t_cor".into(), "3".into());
    session.edit(0, &loaded).unwrap();

    let records = session.records().list_all().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].text("t_cor"), Some("3"));
    assert_eq!(records[1].text("Project"), Some("Second"));
    assert_eq!(records[1].text("t_cor"), Some(""));
    assert_eq!(session.submitted(), 2);

    assert!(matches!(
        session.edit(5, &loaded),
        Err(SessionError::Store(StoreError::IndexOutOfRange { index: 5, len: 2 }))
    ));
}

#[test]
fn test_switch_file_keeps_counter() {
    let temp_dir = TempDir::new().unwrap();
    let mut session = open(&temp_dir);

    let mut form = complete(session.next_form(today()));
    form.insert("E".into(), "2070".into());
    session.submit(&form).unwrap();

    let other = temp_dir.path().join("other.csv");
    session.switch_file(&other);
    assert!(session.records().is_empty().unwrap());

    session.submit(&form).unwrap();
    assert_eq!(session.status(), "2 calculations ran this session");
    assert_eq!(session.records().len().unwrap(), 1);
}
