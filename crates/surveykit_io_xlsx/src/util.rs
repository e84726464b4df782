//! Stateless helper utilities shared by the workbook reader/writer.

use crate::conf::{N_LEN_EXCEL_SHEET_NAME_MAX, TUP_EXCEL_ILLEGAL};

/// Replace invalid chars and trim to a valid Excel sheet name.
pub fn sanitize_sheet_name(name: &str, replace_to: char) -> String {
    let c_name: String = name
        .chars()
        .map(|chr| {
            if TUP_EXCEL_ILLEGAL.contains(&chr) {
                replace_to
            } else {
                chr
            }
        })
        .collect();

    let c_name = c_name.trim();
    if c_name.is_empty() {
        return "Sheet".to_string();
    }
    c_name.chars().take(N_LEN_EXCEL_SHEET_NAME_MAX).collect()
}

/// Estimate displayed width units for one cell text.
///
/// Non-ASCII characters count wider, mirroring typical proportional
/// rendering of CJK and accented glyphs.
pub fn estimate_text_width(s: &str) -> usize {
    let n_ascii = s.chars().filter(|chr| chr.is_ascii()).count();
    let n_non_ascii = s.chars().count().saturating_sub(n_ascii);
    n_ascii + (n_non_ascii as f64 * 1.6).round() as usize
}

pub(crate) fn cast_row_num(value: usize) -> Result<u32, String> {
    u32::try_from(value).map_err(|_| format!("row index overflow: {value}"))
}

pub(crate) fn cast_col_num(value: usize) -> Result<u16, String> {
    u16::try_from(value).map_err(|_| format!("column index overflow: {value}"))
}
