//! `surveykit_io_xlsx` v1:
//! Workbook reader/writer kernel for the consolidation pipeline.
//!
//! Module layout:
//! - `conf`   : constants and default presets
//! - `spec`   : formats/policies/reports
//! - `util`   : pure helper functions
//! - `reader` : workbook to sheet-grid materialization
//! - `writer` : master-table workbook writer

pub mod conf;
pub mod reader;
pub mod spec;
pub mod util;
pub mod writer;

pub use conf::{
    N_LEN_EXCEL_SHEET_NAME_MAX, N_NCOLS_EXCEL_MAX, N_NROWS_EXCEL_MAX, TUP_EXCEL_ILLEGAL,
    derive_default_body_format, derive_default_header_format,
};
pub use reader::SpecWorkbookReader;
pub use spec::{SpecAutofitPolicy, SpecCellFormat, SpecWriteValuePolicy, SpecXlsxSheetReport};
pub use util::{estimate_text_width, sanitize_sheet_name};
pub use writer::XlsxWriter;
