use tracing::trace;

/// Append-only, insertion ordered collection of records for the session.
#[derive(Debug)]
pub struct RecordStore<R> {
    records: Vec<R>,
}

impl<R> Default for RecordStore<R> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

impl<R> RecordStore<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, record: R) {
        self.records.push(record);
        trace!("Appended record #{}", self.records.len());
    }

    pub fn extend(&mut self, records: impl IntoIterator<Item = R>) {
        self.records.extend(records);
    }

    pub fn all(&self) -> &[R] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::employee::sample;

    #[test]
    fn append_keeps_insertion_order() {
        let mut store = RecordStore::new();
        assert_eq!(store.len(), 0);
        store.append(sample("A", "Brown", "Sales"));
        store.append(sample("B", "Adams", "Legal"));
        store.extend(vec![sample("C", "Clark", "Marketing")]);

        let last: Vec<&str> = store.all().iter().map(|e| e.last_name.as_str()).collect();
        assert_eq!(last, vec!["Brown", "Adams", "Clark"]);
        assert_eq!(store.len(), 3);
    }
}
