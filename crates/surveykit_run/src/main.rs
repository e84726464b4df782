use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use surveykit_run::{SpecConsolidateOptions, consolidate_tree};
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

/// Consolidate country survey workbook exports into one master workbook.
#[derive(Debug, Parser)]
#[command(name = "surveykit", version)]
struct Args {
    /// Input directory of workbook exports.
    #[arg(long)]
    dir_in: PathBuf,

    /// Output workbook path.
    #[arg(long)]
    file_out: PathBuf,

    /// Target sheet name; repeat for several sheets.
    #[arg(long = "sheet", value_name = "NAME")]
    sheets: Vec<String>,

    /// Single-capture country classification pattern.
    #[arg(long)]
    country_pattern: Option<String>,

    /// Column-alias mapping file (CSV rows: source,canonical).
    #[arg(long)]
    column_map: Option<PathBuf>,
}

fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    let args = Args::parse();

    let mut spec_options = SpecConsolidateOptions::default();
    if !args.sheets.is_empty() {
        spec_options.l_sheets_target = args.sheets;
    }
    if let Some(pattern_country) = args.country_pattern {
        spec_options.scan.pattern_country = pattern_country;
    }
    spec_options.path_file_column_map = args.column_map;

    let report = consolidate_tree(&args.dir_in, &args.file_out, spec_options)?;

    for skip in &report.l_file_skips {
        error!("skipped file {}: {}", skip.path.display(), skip.exception);
    }
    for skip in &report.l_sheet_skips {
        warn!(
            "skipped {} in {}: {}",
            skip.sheet_name,
            skip.path.display(),
            skip.reason
        );
    }
    for warning in &report.warnings {
        warn!("{warning}");
    }
    info!("{report}");
    info!("output written to {}", args.file_out.display());

    Ok(())
}
