//! Run-level constants and default preset factories.

/// Sheet name of the consolidated output table.
pub const C_SHEET_NAME_MASTER: &str = "Master";

/// Build the default target sheet names for survey exports.
pub fn derive_default_target_sheets() -> Vec<String> {
    vec!["Table 196".to_string(), "Table 197".to_string()]
}
