//! Column-alias mapping file loading.
//!
//! The mapping file is a two-column CSV (`source_label,canonical_label`)
//! loaded once per run into an immutable alias table. Aliases translate
//! observed header texts into the canonical bracket vocabulary; they can
//! never extend that vocabulary.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// Mapping-file validation/load errors.
#[derive(Debug)]
pub enum ConfigError {
    /// Mapping file could not be opened/read.
    Io {
        /// Mapping file path.
        path: PathBuf,
        /// Underlying error text.
        message: String,
    },
    /// A row does not hold the two expected columns.
    Malformed {
        /// Mapping file path.
        path: PathBuf,
        /// 1-based row number.
        n_row: usize,
        /// What was wrong with the row.
        message: String,
    },
    /// A row targets a label outside the canonical vocabulary.
    UnknownCanonicalLabel {
        /// Source label of the offending row.
        c_source: String,
        /// Unknown canonical target.
        c_canonical: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, message } => {
                write!(f, "Failed to read mapping file {}: {message}", path.display())
            }
            Self::Malformed {
                path,
                n_row,
                message,
            } => write!(
                f,
                "Malformed mapping row {n_row} in {}: {message}",
                path.display()
            ),
            Self::UnknownCanonicalLabel {
                c_source,
                c_canonical,
            } => write!(
                f,
                "Mapping {c_source:?} -> {c_canonical:?} targets an unknown canonical label"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load the alias table, validating every canonical target.
pub fn load_column_aliases<P>(
    path_file_map: P,
    l_canonical_labels: &[String],
) -> Result<BTreeMap<String, String>, ConfigError>
where
    P: AsRef<Path>,
{
    let path_file_map = path_file_map.as_ref();
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path_file_map)
        .map_err(|e| ConfigError::Io {
            path: path_file_map.to_path_buf(),
            message: e.to_string(),
        })?;

    let mut dict_aliases = BTreeMap::new();
    for (n_idx, record_res) in reader.records().enumerate() {
        let n_row = n_idx + 1;
        let record = record_res.map_err(|e| ConfigError::Malformed {
            path: path_file_map.to_path_buf(),
            n_row,
            message: e.to_string(),
        })?;

        if record.len() != 2 {
            return Err(ConfigError::Malformed {
                path: path_file_map.to_path_buf(),
                n_row,
                message: format!("expected 2 columns, found {}", record.len()),
            });
        }

        let c_source = record[0].to_string();
        let c_canonical = record[1].to_string();
        if c_source.is_empty() || c_canonical.is_empty() {
            return Err(ConfigError::Malformed {
                path: path_file_map.to_path_buf(),
                n_row,
                message: "empty source or canonical label".to_string(),
            });
        }
        if !l_canonical_labels.contains(&c_canonical) {
            return Err(ConfigError::UnknownCanonicalLabel {
                c_source,
                c_canonical,
            });
        }

        dict_aliases.insert(c_source, c_canonical);
    }

    Ok(dict_aliases)
}
