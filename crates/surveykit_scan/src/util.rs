use globset::{Glob, GlobMatcher};
use regex::Regex;

use crate::spec::{C_COUNTRY_UNKNOWN, EnumScanPatternMode, ScanTreeError};

////////////////////////////////////////////////////////////////////////////////
// #region PatternMatching

#[derive(Debug, Clone)]
pub(crate) enum TypeScanPatternSeq {
    Literal(Vec<String>),
    Glob(Vec<GlobMatcher>),
    Regex(Vec<Regex>),
}

impl TypeScanPatternSeq {
    fn is_match(&self, value: &str) -> bool {
        match self {
            Self::Literal(v) => v.iter().any(|p| value.contains(p.as_str())),
            Self::Glob(v) => v.iter().any(|p| p.is_match(value)),
            Self::Regex(v) => v.iter().any(|p| p.is_match(value)),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct SpecScanPatterns {
    pub(crate) patterns_include_files: Option<TypeScanPatternSeq>,
    pub(crate) patterns_exclude_files: Option<TypeScanPatternSeq>,
}

impl SpecScanPatterns {
    pub(crate) fn from_raw(
        patterns_include_files: Option<&[String]>,
        patterns_exclude_files: Option<&[String]>,
        rule_pattern: EnumScanPatternMode,
    ) -> Result<Self, ScanTreeError> {
        Ok(Self {
            patterns_include_files: _compile(patterns_include_files, rule_pattern)?,
            patterns_exclude_files: _compile(patterns_exclude_files, rule_pattern)?,
        })
    }

    /// A name is excluded when it misses every include pattern or hits any
    /// exclude pattern; an absent include list includes everything.
    pub(crate) fn should_exclude(&self, value: &str) -> bool {
        let if_included = match &self.patterns_include_files {
            None => true,
            Some(patterns) => patterns.is_match(value),
        };
        let if_excluded = match &self.patterns_exclude_files {
            None => false,
            Some(patterns) => patterns.is_match(value),
        };
        !if_included || if_excluded
    }
}

fn _compile(
    patterns: Option<&[String]>,
    rule_pattern: EnumScanPatternMode,
) -> Result<Option<TypeScanPatternSeq>, ScanTreeError> {
    let Some(patterns) = patterns else {
        return Ok(None);
    };
    if patterns.is_empty() {
        return Ok(None);
    }

    match rule_pattern {
        EnumScanPatternMode::Literal => Ok(Some(TypeScanPatternSeq::Literal(patterns.to_vec()))),
        EnumScanPatternMode::Glob => {
            let mut l_glob = Vec::with_capacity(patterns.len());
            for pattern in patterns {
                let matcher = Glob::new(pattern)
                    .map_err(|e| {
                        ScanTreeError::InvalidPattern(format!(
                            "Invalid pattern in include/exclude: {e}"
                        ))
                    })?
                    .compile_matcher();
                l_glob.push(matcher);
            }
            Ok(Some(TypeScanPatternSeq::Glob(l_glob)))
        }
        EnumScanPatternMode::Regex => {
            let mut l_regex = Vec::with_capacity(patterns.len());
            for pattern in patterns {
                let regex = Regex::new(pattern).map_err(|e| {
                    ScanTreeError::InvalidPattern(format!(
                        "Invalid pattern in include/exclude: {e}"
                    ))
                })?;
                l_regex.push(regex);
            }
            Ok(Some(TypeScanPatternSeq::Regex(l_regex)))
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region CountryClassification

/// Compile the single-capture country pattern, validating its group count.
pub(crate) fn compile_country_pattern(pattern: &str) -> Result<Regex, ScanTreeError> {
    let regex = Regex::new(pattern).map_err(|e| {
        ScanTreeError::InvalidCountryPattern(format!("Invalid country pattern: {e}"))
    })?;
    if regex.captures_len() < 2 {
        return Err(ScanTreeError::InvalidCountryPattern(format!(
            "Country pattern needs one capture group: {pattern:?}"
        )));
    }
    Ok(regex)
}

/// Derive the country label from one filename.
///
/// A non-match is a normal outcome, never a failure.
pub(crate) fn classify_country(name_file: &str, regex_country: &Regex) -> String {
    regex_country
        .captures(name_file)
        .and_then(|caps| caps.get(1))
        .map(|cap| cap.as_str().to_string())
        .unwrap_or_else(|| C_COUNTRY_UNKNOWN.to_string())
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
