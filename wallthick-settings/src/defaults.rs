//! Built-in preference keys and their defaults

use crate::types::SettingValue;

/// Fill the form's date with today's date on every reset.
pub const AUTOFILL_DATE: &str = "autofill date";

/// Carry sheet details (project, originator) over to the next form.
pub const AUTOFILL_SHEET_DATA: &str = "autofill sheet data";

/// Known keys with their default values, in file order.
pub fn values() -> Vec<(String, SettingValue)> {
    vec![
        (AUTOFILL_DATE.to_string(), SettingValue::Bool(true)),
        (AUTOFILL_SHEET_DATA.to_string(), SettingValue::Bool(true)),
    ]
}
