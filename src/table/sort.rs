use std::cmp::Ordering;

use tracing::trace;

use super::Record;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn indicator(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
        }
    }
}

/// Active sort column and direction. `key` is `None` until the first sort
/// request, which keeps the store order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SortState {
    pub key: Option<String>,
    pub direction: SortDirection,
}

impl SortState {
    #[cfg(test)]
    pub fn new(key: &str, direction: SortDirection) -> Self {
        Self {
            key: Some(key.to_string()),
            direction,
        }
    }

    /// Clicking the active ascending column flips it to descending, anything
    /// else sorts the requested column ascending.
    pub fn request_sort(&mut self, key: &str) {
        let direction = if self.key.as_deref() == Some(key)
            && self.direction == SortDirection::Ascending
        {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        };
        self.key = Some(key.to_string());
        self.direction = direction;
        trace!("Sort by {key} {direction:?}");
    }

    /// Header decoration for the column `key`, if it is the sorted one.
    pub fn indicator_for(&self, key: &str) -> Option<&'static str> {
        match self.key.as_deref() {
            Some(k) if k == key => Some(self.direction.indicator()),
            _ => None,
        }
    }
}

/// Stable sort of `records` by the value at the sort key. Values compare as
/// plain strings, so "10001" sorts before "9" and dates sort as text.
pub fn sort_records<'a, R: Record>(mut records: Vec<&'a R>, state: &SortState) -> Vec<&'a R> {
    let Some(key) = state.key.as_deref() else {
        return records;
    };

    records.sort_by(|a, b| {
        let ord = compare(a.value(key), b.value(key));
        match state.direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    });
    records
}

fn compare(a: Option<&str>, b: Option<&str>) -> Ordering {
    a.unwrap_or("").cmp(b.unwrap_or(""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::employee::{Employee, sample};
    use proptest::prelude::*;

    fn last_names(records: &[&Employee]) -> Vec<String> {
        records.iter().map(|e| e.last_name.clone()).collect()
    }

    #[test]
    fn sorts_by_last_name_both_ways() {
        let records = vec![
            sample("a", "Brown", "Sales"),
            sample("b", "Adams", "Sales"),
            sample("c", "Clark", "Sales"),
        ];
        let refs: Vec<&Employee> = records.iter().collect();

        let asc = sort_records(refs.clone(), &SortState::new("lastName", SortDirection::Ascending));
        assert_eq!(last_names(&asc), vec!["Adams", "Brown", "Clark"]);

        let desc = sort_records(refs, &SortState::new("lastName", SortDirection::Descending));
        assert_eq!(last_names(&desc), vec!["Clark", "Brown", "Adams"]);
    }

    #[test]
    fn no_key_keeps_input_order() {
        let records = vec![sample("a", "Zed", "Sales"), sample("b", "Amy", "Sales")];
        let refs: Vec<&Employee> = records.iter().collect();
        let sorted = sort_records(refs, &SortState::default());
        assert_eq!(last_names(&sorted), vec!["Zed", "Amy"]);
    }

    #[test]
    fn ties_keep_prior_order_in_both_directions() {
        let records = vec![
            sample("first", "Same", "Legal"),
            sample("second", "Same", "Legal"),
            sample("third", "Other", "Legal"),
        ];
        let refs: Vec<&Employee> = records.iter().collect();
        for direction in [SortDirection::Ascending, SortDirection::Descending] {
            let sorted = sort_records(refs.clone(), &SortState::new("lastName", direction));
            let firsts: Vec<&str> = sorted
                .iter()
                .filter(|e| e.last_name == "Same")
                .map(|e| e.first_name.as_str())
                .collect();
            assert_eq!(firsts, vec!["first", "second"]);
        }
    }

    #[test]
    fn zip_codes_sort_as_text() {
        let mut a = sample("a", "A", "Sales");
        a.zip_code = "9".into();
        let mut b = sample("b", "B", "Sales");
        b.zip_code = "10001".into();
        let records = vec![a, b];
        let sorted = sort_records(
            records.iter().collect(),
            &SortState::new("zipCode", SortDirection::Ascending),
        );
        assert_eq!(sorted[0].zip_code, "10001");
    }

    #[test]
    fn unknown_key_keeps_order() {
        let records = vec![sample("a", "Zed", "Sales"), sample("b", "Amy", "Sales")];
        let sorted = sort_records(
            records.iter().collect(),
            &SortState::new("salary", SortDirection::Descending),
        );
        assert_eq!(last_names(&sorted), vec!["Zed", "Amy"]);
    }

    #[test]
    fn request_sort_toggles() {
        let mut state = SortState::new("lastName", SortDirection::Ascending);
        state.request_sort("lastName");
        assert_eq!(state, SortState::new("lastName", SortDirection::Descending));
        state.request_sort("lastName");
        assert_eq!(state, SortState::new("lastName", SortDirection::Ascending));
        state.request_sort("lastName");
        state.request_sort("department");
        assert_eq!(state, SortState::new("department", SortDirection::Ascending));
        assert_eq!(state.indicator_for("department"), Some("▲"));
        assert_eq!(state.indicator_for("lastName"), None);
    }

    #[test]
    fn first_request_is_ascending() {
        let mut state = SortState::default();
        assert_eq!(state.key, None);
        state.request_sort("city");
        assert_eq!(state, SortState::new("city", SortDirection::Ascending));
    }

    proptest! {
        #[test]
        fn sort_is_idempotent(
            names in proptest::collection::vec("[a-cA-C]{0,3}", 0..30),
            descending in any::<bool>(),
        ) {
            let records: Vec<Employee> = names.iter().map(|n| sample("x", n, "Sales")).collect();
            let direction = if descending { SortDirection::Descending } else { SortDirection::Ascending };
            let state = SortState::new("lastName", direction);

            let once = sort_records(records.iter().collect(), &state);
            let twice = sort_records(once.clone(), &state);
            prop_assert!(once.iter().zip(twice.iter()).all(|(a, b)| std::ptr::eq(*a, *b)));
        }
    }
}
