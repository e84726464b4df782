//! `surveykit_extract` v1:
//! Pure extraction kernel for fixed-layout survey table sheets.
//!
//! Module layout:
//! - `conf`      : offset constants and default presets
//! - `spec`      : cell/grid/record models and options
//! - `normalize` : age-bracket column normalization
//! - `extract`   : fixed-offset table extraction
//! - `aggregate` : master-table concatenation
//! - `report`    : per-extraction report model

pub mod aggregate;
pub mod conf;
pub mod extract;
pub mod normalize;
pub mod report;
pub mod spec;

pub use aggregate::concat_records;
pub use conf::{
    C_LABEL_BANNER_1_UNKNOWN, C_LABEL_BANNER_2_UNKNOWN, N_COL_IDX_LABEL,
    N_COL_IDX_RESPONSES_FIRST, N_COL_IDX_RESPONSES_LAST, N_COL_OFFSET_AGE, N_NROWS_SHEET_MIN,
    N_ROW_IDX_BANNER_1, N_ROW_IDX_BANNER_2, N_ROW_IDX_HEADER, N_ROW_IDX_QUESTIONS_FIRST,
    derive_default_age_brackets, derive_default_demographic_positions,
};
pub use extract::extract_table;
pub use normalize::derive_age_column_map;
pub use report::{EnumExtractSkipReason, ReportExtract, ReportExtractBuilder, SpecExtractSkip};
pub use spec::{
    EnumCellValue, SpecAgeColumnMap, SpecExtractOptions, SpecExtractedRecord, SpecMasterTable,
    SpecSheetGrid,
};
