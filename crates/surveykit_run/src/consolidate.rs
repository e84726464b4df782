//! End-to-end consolidation pipeline orchestration.

use std::path::Path;

use tracing::{debug, error, info};

use surveykit_extract::aggregate::concat_records;
use surveykit_extract::extract::extract_table;
use surveykit_extract::report::ReportExtractBuilder;
use surveykit_extract::spec::{SpecExtractedRecord, SpecMasterTable};
use surveykit_io_xlsx::reader::SpecWorkbookReader;
use surveykit_io_xlsx::writer::XlsxWriter;
use surveykit_scan::scan::scan_tree;
use surveykit_scan::spec::SpecSourceFile;

use crate::config::load_column_aliases;
use crate::report::{ReportConsolidate, ReportConsolidateBuilder};
use crate::spec::{ConsolidateError, SpecConsolidateOptions};

/// Consolidate a directory of survey workbook exports into one workbook.
///
/// Pipeline, strictly sequential: discover and classify source files,
/// extract the target sheets of each file through the fixed-layout
/// contract, concatenate all records in source order, and write the
/// single-sheet master workbook once at the end of the run.
///
/// Containment policy: per-unit failures (file open, sheet read,
/// structural layout, banner rows) are recorded in the returned
/// [`ReportConsolidate`] and never abort the run. Only setup failures
/// (bad input directory, invalid patterns, unreadable mapping file) and
/// the final output write surface as [`ConsolidateError`].
pub fn consolidate_tree<P, Q>(
    dir_source: P,
    file_destination: Q,
    spec_options: SpecConsolidateOptions,
) -> Result<ReportConsolidate, ConsolidateError>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let mut spec_options = spec_options;
    if let Some(path_file_map) = &spec_options.path_file_column_map {
        spec_options.extract.dict_header_aliases =
            load_column_aliases(path_file_map, &spec_options.extract.l_age_brackets)?;
    }

    let outcome_scan = scan_tree(dir_source.as_ref(), &spec_options.scan)?;
    info!(
        n_files = outcome_scan.l_files.len(),
        "discovered source workbooks"
    );

    let mut builder = ReportConsolidateBuilder::default();
    builder.cnt_files_scanned = outcome_scan.report.cnt_scanned;
    builder.cnt_files_matched = outcome_scan.report.cnt_matched;
    builder.warnings.extend(outcome_scan.report.warnings);

    let mut l_batches = Vec::with_capacity(outcome_scan.l_files.len());
    for spec_file in &outcome_scan.l_files {
        debug!(name = %spec_file.name_file, country = %spec_file.country, "processing");
        l_batches.push(process_file(spec_file, &spec_options, &mut builder));
    }

    let master = concat_records(l_batches);
    builder.cnt_records = master.n_records() as u64;

    let mut writer = XlsxWriter::new(file_destination.as_ref().to_path_buf());
    writer
        .write_sheet(
            &spec_options.sheet_name_out,
            &SpecMasterTable::derive_column_labels(&spec_options.extract),
            &master.derive_rows(),
        )
        .map_err(ConsolidateError::Write)?;
    writer.close().map_err(ConsolidateError::Write)?;

    Ok(builder.build())
}

/// Process one source workbook, containing failures at file/sheet level.
fn process_file(
    spec_file: &SpecSourceFile,
    spec_options: &SpecConsolidateOptions,
    builder: &mut ReportConsolidateBuilder,
) -> Vec<SpecExtractedRecord> {
    let mut reader = match SpecWorkbookReader::open(&spec_file.path_file) {
        Ok(v) => v,
        Err(msg) => {
            error!(name = %spec_file.name_file, "{msg}");
            builder.add_file_skip(spec_file.path_file.clone(), msg);
            return vec![];
        }
    };
    builder.add_file_processed();

    let l_sheet_names: Vec<String> = reader
        .sheet_names()
        .into_iter()
        .filter(|c_name| spec_options.l_sheets_target.contains(c_name))
        .collect();

    let mut builder_extract = ReportExtractBuilder::default();
    let mut l_records = Vec::new();
    for c_sheet_name in &l_sheet_names {
        match reader.read_sheet_grid(c_sheet_name) {
            Ok(grid) => {
                l_records.extend(extract_table(
                    &grid,
                    c_sheet_name,
                    &spec_file.country,
                    &spec_options.extract,
                    &mut builder_extract,
                ));
            }
            Err(msg) => {
                error!(name = %spec_file.name_file, sheet = %c_sheet_name, "{msg}");
                builder.add_sheet_read_failure(spec_file.path_file.clone(), c_sheet_name, msg);
            }
        }
    }

    builder.merge_extract(&spec_file.path_file, builder_extract.build());
    l_records
}
