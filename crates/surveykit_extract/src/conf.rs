//! Extraction constants and default preset factories.

/// Header row index holding the age-bracket column texts.
pub const N_ROW_IDX_HEADER: usize = 6;
/// Row index of the first banner label cell.
pub const N_ROW_IDX_BANNER_1: usize = 8;
/// Row index of the second banner label cell.
pub const N_ROW_IDX_BANNER_2: usize = 9;
/// Row index where the question scan starts.
pub const N_ROW_IDX_QUESTIONS_FIRST: usize = 10;
/// Minimum row count required by the fixed header layout.
pub const N_NROWS_SHEET_MIN: usize = 7;

/// Column index of the label cell (questions and banner labels).
pub const N_COL_IDX_LABEL: usize = 1;
/// First response column index (inclusive).
pub const N_COL_IDX_RESPONSES_FIRST: usize = 2;
/// Last response column index (inclusive).
pub const N_COL_IDX_RESPONSES_LAST: usize = 13;
/// Offset added to a header-row hit position to obtain its sheet column.
pub const N_COL_OFFSET_AGE: usize = 2;

/// Placeholder for an empty or absent first banner label.
pub const C_LABEL_BANNER_1_UNKNOWN: &str = "Unknown_1";
/// Placeholder for an empty or absent second banner label.
pub const C_LABEL_BANNER_2_UNKNOWN: &str = "Unknown_2";

/// Build the closed canonical age-bracket vocabulary.
///
/// Near-duplicates ("35+" vs "35-44") are distinct entries, never merged.
pub fn derive_default_age_brackets() -> Vec<String> {
    [
        "18-24",
        "25-34",
        "35-44",
        "35+",
        "45+",
        "45-54",
        "55-64",
        "55+",
        "65+",
        "NET: 18-34",
        "NET: 35-54",
        "NET: 35+",
        "NET: 55+",
    ]
    .into_iter()
    .map(ToString::to_string)
    .collect()
}

/// Build the fixed demographic response positions (label, sheet column).
pub fn derive_default_demographic_positions() -> Vec<(String, usize)> {
    vec![
        ("Total Resp".to_string(), 2),
        ("Male".to_string(), 3),
        ("Female".to_string(), 4),
    ]
}
