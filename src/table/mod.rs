//! Client side table view over an in-memory record set.
//!
//! The view owns only transient state (search term, sort, pagination). Every
//! refresh runs the same pipeline over the records it is handed:
//! filter, then sort, then paginate. Pagination has to come last so the page
//! count is computed over the filtered rows.

mod filter;
mod pagination;
mod sort;

use derive_setters::Setters;
use tracing::trace;

pub use filter::filter_records;
pub use pagination::{Page, PageSize, PaginationState, paginate};
pub use sort::{SortState, sort_records};

/// A flat record whose fields can be looked up by key.
pub trait Record {
    /// Value of the field `key`, `None` if the record has no such field.
    fn value(&self, key: &str) -> Option<&str>;

    /// Text the free-text filter matches against.
    fn search_text(&self) -> String;
}

/// Which record field a column shows and its header text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    pub key: String,
    pub header: String,
}

impl ColumnSpec {
    pub fn new(key: &str, header: &str) -> Self {
        Self {
            key: key.to_string(),
            header: header.to_string(),
        }
    }
}

/// Static configuration of a table view.
#[derive(Debug, Clone, Setters)]
#[setters(into)]
pub struct TableOptions {
    pub columns: Vec<ColumnSpec>,
    /// Defaults to 10.
    pub items_per_page: PageSize,
    /// Shown instead of rows when nothing matches. Defaults to "No data available".
    pub empty_message: String,
    /// Defaults to "Search...".
    pub search_placeholder: String,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            columns: Vec::new(),
            items_per_page: PageSize::default(),
            empty_message: "No data available".to_string(),
            search_placeholder: "Search...".to_string(),
        }
    }
}

/// Everything needed to draw one refresh of the table.
#[derive(Debug)]
pub struct TableData<'a, R> {
    pub headers: Vec<String>,
    pub page: Page<'a, R>,
    pub page_window: Vec<usize>,
    /// Number of records before filtering.
    pub total_records: usize,
}

pub struct TableView {
    options: TableOptions,
    sort: SortState,
    pagination: PaginationState,
    search_term: String,
}

impl TableView {
    pub fn new(options: TableOptions) -> Self {
        let pagination = PaginationState::new(options.items_per_page);
        Self {
            options,
            sort: SortState::default(),
            pagination,
            search_term: String::new(),
        }
    }

    pub fn options(&self) -> &TableOptions {
        &self.options
    }

    pub fn pagination(&self) -> &PaginationState {
        &self.pagination
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// A new search starts over on the first page.
    pub fn set_search_term(&mut self, term: &str) {
        if self.search_term != term {
            trace!("Search term \"{}\" -> \"{}\"", self.search_term, term);
            self.search_term = term.to_string();
            self.pagination.first_page(0);
        }
    }

    pub fn request_sort(&mut self, key: &str) {
        self.sort.request_sort(key);
    }

    /// Sort by the column at `column`, ignored if there is no such column.
    pub fn request_sort_column(&mut self, column: usize) {
        if let Some(key) = self.options.columns.get(column).map(|c| c.key.clone()) {
            self.request_sort(&key);
        }
    }

    pub fn set_items_per_page(&mut self, items_per_page: PageSize) {
        self.pagination.set_items_per_page(items_per_page);
    }

    pub fn cycle_items_per_page(&mut self) {
        let next = self.pagination.items_per_page().next();
        self.set_items_per_page(next);
    }

    /// Number of records that pass the current search.
    pub fn filtered_len<R: Record>(&self, records: &[R]) -> usize {
        filter_records(records, &self.search_term).len()
    }

    pub fn go_to_page<R: Record>(&mut self, page: usize, records: &[R]) {
        let total = self.filtered_len(records);
        self.pagination.go_to_page(page, total);
    }

    pub fn next_page<R: Record>(&mut self, records: &[R]) {
        let total = self.filtered_len(records);
        self.pagination.next_page(total);
    }

    pub fn prev_page<R: Record>(&mut self, records: &[R]) {
        let total = self.filtered_len(records);
        self.pagination.prev_page(total);
    }

    pub fn first_page<R: Record>(&mut self, records: &[R]) {
        let total = self.filtered_len(records);
        self.pagination.first_page(total);
    }

    pub fn last_page<R: Record>(&mut self, records: &[R]) {
        let total = self.filtered_len(records);
        self.pagination.last_page(total);
    }

    /// Run the filter, sort, paginate pipeline. The current page is clamped
    /// to the filtered row count on the way.
    pub fn refresh<'a, R: Record>(&mut self, records: &'a [R]) -> TableData<'a, R> {
        let filtered = filter_records(records, &self.search_term);
        self.pagination.clamp(filtered.len());
        let page_window = self.pagination.page_window(filtered.len());

        let sorted = sort_records(filtered, &self.sort);
        let page = paginate(sorted, &self.pagination);

        let headers = self
            .options
            .columns
            .iter()
            .map(|c| match self.sort.indicator_for(&c.key) {
                Some(indicator) => format!("{} {}", c.header, indicator),
                None => c.header.clone(),
            })
            .collect();

        TableData {
            headers,
            page,
            page_window,
            total_records: records.len(),
        }
    }

    /// Cell texts of `rows`, one entry per column. Unknown keys give empty cells.
    pub fn cells<R: Record>(&self, rows: &[&R]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|r| {
                self.options
                    .columns
                    .iter()
                    .map(|c| r.value(&c.key).unwrap_or("").to_string())
                    .collect()
            })
            .collect()
    }
}
