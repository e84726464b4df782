//! Age-bracket column normalization over a sheet's header row.

use crate::spec::{SpecAgeColumnMap, SpecExtractOptions, SpecSheetGrid};

/// Collect the non-empty header texts inside the response range, in order.
///
/// Empty cells are compacted away, so a hit position counts non-empty
/// texts only; the layout offset is applied on top of that position.
pub fn collect_header_texts(grid: &SpecSheetGrid, options: &SpecExtractOptions) -> Vec<String> {
    let mut l_texts = Vec::new();
    for n_idx_col in options.n_col_idx_responses_first..=options.n_col_idx_responses_last {
        if let Some(c_text) = grid.text_at(options.n_row_idx_header, n_idx_col) {
            l_texts.push(c_text);
        }
    }
    l_texts
}

/// Map every canonical age bracket to its resolved sheet column.
///
/// Header texts are first translated through the alias table; a bracket
/// absent from the header maps to `None` and is never invented. Labels may
/// appear in any order; near-duplicates stay distinct canonical entries.
pub fn derive_age_column_map(
    grid: &SpecSheetGrid,
    options: &SpecExtractOptions,
) -> SpecAgeColumnMap {
    let l_header_texts: Vec<String> = collect_header_texts(grid, options)
        .into_iter()
        .map(|c_text| {
            options
                .dict_header_aliases
                .get(&c_text)
                .cloned()
                .unwrap_or(c_text)
        })
        .collect();

    let l_pairs = options
        .l_age_brackets
        .iter()
        .map(|c_bracket| {
            let position = l_header_texts
                .iter()
                .position(|c_text| c_text == c_bracket)
                .map(|n_idx| n_idx + options.n_col_offset_age);
            (c_bracket.clone(), position)
        })
        .collect();

    SpecAgeColumnMap::from_pairs(l_pairs)
}
