use super::Record;

/// Keep the records whose search text contains `term`, ignoring case.
/// The result preserves the input order and an empty term keeps everything.
pub fn filter_records<'a, R: Record>(records: &'a [R], term: &str) -> Vec<&'a R> {
    let term = term.to_lowercase();
    records
        .iter()
        .filter(|r| term.is_empty() || matches(*r, &term))
        .collect()
}

// `term` has to be lower-cased already.
fn matches<R: Record>(record: &R, term: &str) -> bool {
    record.search_text().to_lowercase().contains(term)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::employee::{Employee, sample};
    use proptest::prelude::*;

    #[test]
    fn matches_department_substring() {
        let records = vec![
            sample("Ada", "Lovelace", "Engineering"),
            sample("Bob", "Seller", "Sales"),
        ];
        let found = filter_records(&records, "eng");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].department, "Engineering");
    }

    #[test]
    fn empty_term_keeps_everything() {
        let records = vec![sample("A", "B", "Sales"), sample("C", "D", "Legal")];
        assert_eq!(filter_records(&records, "").len(), 2);
    }

    #[test]
    fn match_spans_field_boundaries() {
        let records = vec![sample("Ada", "Lovelace", "Legal")];
        assert_eq!(filter_records(&records, "ADA LOVE").len(), 1);
        assert_eq!(filter_records(&records, "lovelace legal").len(), 1);
        // Only names and department are searched.
        assert!(filter_records(&records, "springfield").is_empty());
    }

    fn employee() -> impl Strategy<Value = Employee> {
        ("[a-zA-Z]{0,5}", "[a-zA-Z]{0,5}", "[a-zA-Z ]{0,6}")
            .prop_map(|(first, last, dept)| sample(&first, &last, &dept))
    }

    proptest! {
        #[test]
        fn filter_is_ordered_subsequence(
            records in proptest::collection::vec(employee(), 0..30),
            term in "[a-zA-Z]{0,2}",
        ) {
            let found = filter_records(&records, &term);
            let lower = term.to_lowercase();

            // Every kept record matches, and kept records appear in input order.
            let mut cursor = 0;
            for r in found {
                prop_assert!(r.search_text().to_lowercase().contains(&lower));
                let pos = records[cursor..]
                    .iter()
                    .position(|c| std::ptr::eq(c, r))
                    .map(|p| p + cursor);
                prop_assert!(pos.is_some());
                cursor = pos.unwrap_or(0) + 1;
            }
        }
    }
}
