//! Order-preserving master-table concatenation.

use crate::spec::{SpecExtractedRecord, SpecMasterTable};

/// Concatenate per-source record batches into one master table.
///
/// Pure append: source order is preserved, nothing is deduplicated,
/// re-sorted, or coerced, and well-formed input never fails.
pub fn concat_records(l_batches: Vec<Vec<SpecExtractedRecord>>) -> SpecMasterTable {
    let n_records_total = l_batches.iter().map(Vec::len).sum();
    let mut l_records = Vec::with_capacity(n_records_total);
    for l_batch in l_batches {
        l_records.extend(l_batch);
    }
    SpecMasterTable { l_records }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::EnumCellValue;

    fn derive_record(c_country: &str, c_label: &str) -> SpecExtractedRecord {
        SpecExtractedRecord {
            country: c_country.to_string(),
            sheet_name: "Table 196".to_string(),
            label: c_label.to_string(),
            banner_labels: ("Age".to_string(), "Income".to_string()),
            responses: vec![("Total Resp".to_string(), EnumCellValue::Number(1.0))],
        }
    }

    #[test]
    fn test_concat_is_order_preserving_and_lossless() {
        let l_batch_a = vec![derive_record("France", "Q1"), derive_record("France", "Q2")];
        let l_batch_b = vec![
            derive_record("Italy", "Q1"),
            derive_record("Italy", "Q2"),
            derive_record("Italy", "Q3"),
        ];

        let master = concat_records(vec![l_batch_a.clone(), l_batch_b.clone()]);

        assert_eq!(master.n_records(), l_batch_a.len() + l_batch_b.len());
        let l_labels: Vec<&str> = master
            .l_records
            .iter()
            .map(|record| record.label.as_str())
            .collect();
        assert_eq!(l_labels, vec!["Q1", "Q2", "Q1", "Q2", "Q3"]);
        assert_eq!(master.l_records[0].country, "France");
        assert_eq!(master.l_records[2].country, "Italy");
    }

    #[test]
    fn test_concat_of_empty_batches_is_empty() {
        let master = concat_records(vec![vec![], vec![]]);
        assert_eq!(master.n_records(), 0);
        assert_eq!(master.derive_rows().len(), 0);
    }

    #[test]
    fn test_derive_rows_leads_with_country_sheet_label() {
        let master = concat_records(vec![vec![derive_record("France", "Q1")]]);
        let l_rows = master.derive_rows();

        assert_eq!(l_rows.len(), 1);
        assert_eq!(l_rows[0][0], EnumCellValue::Text("France".to_string()));
        assert_eq!(l_rows[0][1], EnumCellValue::Text("Table 196".to_string()));
        assert_eq!(l_rows[0][2], EnumCellValue::Text("Q1".to_string()));
        assert_eq!(l_rows[0][3], EnumCellValue::Number(1.0));
    }
}
