use std::fmt;
use std::str::FromStr;

use tracing::trace;

/// Maximum number of page numbers offered for direct navigation.
pub const PAGE_WINDOW: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageSize {
    #[default]
    Ten,
    TwentyFive,
    Fifty,
    Hundred,
}

impl PageSize {
    pub const ALL: [PageSize; 4] = [
        PageSize::Ten,
        PageSize::TwentyFive,
        PageSize::Fifty,
        PageSize::Hundred,
    ];

    pub fn get(&self) -> usize {
        match self {
            PageSize::Ten => 10,
            PageSize::TwentyFive => 25,
            PageSize::Fifty => 50,
            PageSize::Hundred => 100,
        }
    }

    /// The next larger size, wrapping around to the smallest.
    pub fn next(&self) -> PageSize {
        match self {
            PageSize::Ten => PageSize::TwentyFive,
            PageSize::TwentyFive => PageSize::Fifty,
            PageSize::Fifty => PageSize::Hundred,
            PageSize::Hundred => PageSize::Ten,
        }
    }
}

impl TryFrom<usize> for PageSize {
    type Error = String;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        PageSize::ALL
            .iter()
            .copied()
            .find(|s| s.get() == value)
            .ok_or_else(|| format!("page size must be one of 10, 25, 50, 100 (got {value})"))
    }
}

impl FromStr for PageSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let n: usize = s
            .trim()
            .parse()
            .map_err(|_| format!("invalid page size \"{s}\""))?;
        PageSize::try_from(n)
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

/// Current page (1-based) and page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationState {
    current_page: usize,
    items_per_page: PageSize,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self::new(PageSize::default())
    }
}

impl PaginationState {
    pub fn new(items_per_page: PageSize) -> Self {
        Self {
            current_page: 1,
            items_per_page,
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn items_per_page(&self) -> PageSize {
        self.items_per_page
    }

    pub fn total_pages(&self, total_rows: usize) -> usize {
        total_rows.div_ceil(self.items_per_page.get())
    }

    /// Move to `requested`, clamped into the valid page range.
    pub fn go_to_page(&mut self, requested: usize, total_rows: usize) {
        let last = self.total_pages(total_rows).max(1);
        self.current_page = requested.clamp(1, last);
        trace!("Go to page {requested} -> {}/{last}", self.current_page);
    }

    pub fn next_page(&mut self, total_rows: usize) {
        self.go_to_page(self.current_page + 1, total_rows);
    }

    pub fn prev_page(&mut self, total_rows: usize) {
        self.go_to_page(self.current_page.saturating_sub(1), total_rows);
    }

    pub fn first_page(&mut self, total_rows: usize) {
        self.go_to_page(1, total_rows);
    }

    pub fn last_page(&mut self, total_rows: usize) {
        self.go_to_page(self.total_pages(total_rows), total_rows);
    }

    /// A new density invalidates the old offset, so this always returns to page 1.
    pub fn set_items_per_page(&mut self, items_per_page: PageSize) {
        self.items_per_page = items_per_page;
        self.current_page = 1;
    }

    /// Pull the current page back into range after the row count changed.
    pub fn clamp(&mut self, total_rows: usize) {
        self.go_to_page(self.current_page, total_rows);
    }

    /// Up to `PAGE_WINDOW` page numbers around the current page.
    pub fn page_window(&self, total_rows: usize) -> Vec<usize> {
        let total_pages = self.total_pages(total_rows);
        let half = PAGE_WINDOW / 2;
        let start = self.current_page.saturating_sub(half).max(1);
        let end = total_pages.min(start + PAGE_WINDOW - 1);
        let start = end.saturating_sub(PAGE_WINDOW - 1).max(1);
        (start..=end).collect()
    }
}

/// One page of rows together with what the footer needs to describe it.
#[derive(Debug)]
pub struct Page<'a, R> {
    pub rows: Vec<&'a R>,
    pub current_page: usize,
    pub total_pages: usize,
    pub total_rows: usize,
    /// 1-based inclusive range of the rows shown, `None` when there are none.
    pub range: Option<(usize, usize)>,
}

impl<R> Page<'_, R> {
    pub fn describe(&self) -> String {
        match self.range {
            Some((start, end)) => format!("{start} to {end} of {}", self.total_rows),
            None => "0 to 0 of 0".to_string(),
        }
    }
}

pub fn paginate<'a, R>(records: Vec<&'a R>, state: &PaginationState) -> Page<'a, R> {
    let total_rows = records.len();
    let per_page = state.items_per_page().get();
    let total_pages = state.total_pages(total_rows);
    let current_page = state.current_page().clamp(1, total_pages.max(1));

    let start = (current_page - 1) * per_page;
    let end = (start + per_page).min(total_rows);
    let rows: Vec<&R> = if start < end {
        records[start..end].to_vec()
    } else {
        Vec::new()
    };

    let range = if rows.is_empty() {
        None
    } else {
        Some((start + 1, end))
    };

    Page {
        rows,
        current_page,
        total_pages,
        total_rows,
        range,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn numbers(n: usize) -> Vec<usize> {
        (1..=n).collect()
    }

    #[test]
    fn twenty_three_rows_in_pages_of_ten() {
        let data = numbers(23);
        let mut state = PaginationState::new(PageSize::Ten);

        let page = paginate(data.iter().collect(), &state);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.range, Some((1, 10)));
        assert_eq!(page.rows.first(), Some(&&1));

        state.go_to_page(3, data.len());
        let page = paginate(data.iter().collect(), &state);
        assert_eq!(page.rows, vec![&21, &22, &23]);
        assert_eq!(page.describe(), "21 to 23 of 23");
    }

    #[test]
    fn out_of_range_pages_are_clamped() {
        let mut state = PaginationState::new(PageSize::Ten);
        state.go_to_page(99, 23);
        assert_eq!(state.current_page(), 3);
        state.go_to_page(0, 23);
        assert_eq!(state.current_page(), 1);
        state.last_page(23);
        state.next_page(23);
        assert_eq!(state.current_page(), 3);
        state.prev_page(23);
        assert_eq!(state.current_page(), 2);
    }

    #[test]
    fn clamp_after_rows_shrink() {
        let mut state = PaginationState::new(PageSize::Ten);
        state.go_to_page(5, 50);
        state.clamp(12);
        assert_eq!(state.current_page(), 2);
        state.clamp(0);
        assert_eq!(state.current_page(), 1);
    }

    #[test]
    fn changing_page_size_resets_page() {
        let mut state = PaginationState::new(PageSize::Ten);
        state.go_to_page(4, 100);
        state.set_items_per_page(PageSize::TwentyFive);
        assert_eq!(state.current_page(), 1);
        assert_eq!(state.items_per_page(), PageSize::TwentyFive);
    }

    #[test]
    fn empty_input_has_no_pages() {
        let data: Vec<usize> = Vec::new();
        let page = paginate(data.iter().collect(), &PaginationState::default());
        assert_eq!(page.total_pages, 0);
        assert_eq!(page.current_page, 1);
        assert!(page.rows.is_empty());
        assert_eq!(page.range, None);
        assert_eq!(page.describe(), "0 to 0 of 0");
    }

    #[test]
    fn page_window_is_centered_and_clamped() {
        let mut state = PaginationState::new(PageSize::Ten);
        let rows = 200; // 20 pages
        assert_eq!(state.page_window(rows), vec![1, 2, 3, 4, 5]);
        state.go_to_page(10, rows);
        assert_eq!(state.page_window(rows), vec![8, 9, 10, 11, 12]);
        state.go_to_page(20, rows);
        assert_eq!(state.page_window(rows), vec![16, 17, 18, 19, 20]);
        state.go_to_page(2, 30);
        assert_eq!(state.page_window(30), vec![1, 2, 3]);
        assert!(PaginationState::default().page_window(0).is_empty());
    }

    #[test]
    fn page_size_parsing() {
        assert_eq!("25".parse::<PageSize>(), Ok(PageSize::TwentyFive));
        assert!("30".parse::<PageSize>().is_err());
        assert!("ten".parse::<PageSize>().is_err());
        assert_eq!(PageSize::Hundred.next(), PageSize::Ten);
    }

    proptest! {
        #[test]
        fn pages_reassemble_input(n in 0usize..260, size in 0usize..4) {
            let data = numbers(n);
            let mut state = PaginationState::new(PageSize::ALL[size]);
            let per_page = state.items_per_page().get();
            let total_pages = state.total_pages(n);
            prop_assert_eq!(total_pages, n.div_ceil(per_page));

            let mut joined = Vec::new();
            for p in 1..=total_pages {
                state.go_to_page(p, n);
                let page = paginate(data.iter().collect(), &state);
                prop_assert!(page.rows.len() <= per_page);
                if p == total_pages {
                    prop_assert!(!page.rows.is_empty());
                }
                joined.extend(page.rows.into_iter().copied());
            }
            prop_assert_eq!(joined, data);
        }
    }
}
