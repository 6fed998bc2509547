//! Page arithmetic shared by the list pages and the manage API.
//!
//! Pages are 1-based everywhere: `currentPage=1` is the first page, exactly as
//! the `/manage/{resource}/page` endpoints expect it.

use std::collections::BTreeMap;

/// Query key for the 1-based page number
pub const CURRENT_PAGE_KEY: &str = "currentPage";
/// Query key for the page size
pub const PAGE_SIZE_KEY: &str = "pageSize";

pub const DEFAULT_PAGE_SIZE: u64 = 10;
pub const MAX_PAGE_SIZE: u64 = 500;
pub const PAGE_SIZE_OPTIONS: [u64; 4] = [10, 20, 50, 100];

/// Number of page buttons rendered by the pagination control
pub const PAGE_WINDOW: u64 = 5;

/// Largest row offset a page query produces. SQL `OFFSET` is a signed 64-bit
/// value, so anything past it is an empty page anyway.
pub const MAX_OFFSET: u64 = i64::MAX as u64;

/// `ceil(total_num / page_size)`, zero for an empty result or a zero page size
pub fn total_pages(total_num: u64, page_size: u64) -> u64 {
    if page_size == 0 {
        return 0;
    }
    total_num.div_ceil(page_size)
}

/// Page numbers to render as buttons: at most `width` pages centered on
/// `current`, shifted so the window stays inside `[1, total_pages]`.
pub fn page_window(current: u64, total_pages: u64, width: u64) -> Vec<u64> {
    if total_pages == 0 || width == 0 {
        return Vec::new();
    }
    let width = width.min(total_pages);
    let current = current.clamp(1, total_pages);

    let half = width / 2;
    let mut start = current.saturating_sub(half).max(1);
    if start + width - 1 > total_pages {
        start = total_pages - width + 1;
    }
    (start..start + width).collect()
}

/// Parses the jump-to-page input. Anything that is not a page in
/// `[1, total_pages]` is ignored.
pub fn parse_jump(input: &str, total_pages: u64) -> Option<u64> {
    let page = input.trim().parse::<u64>().ok()?;
    (1..=total_pages).contains(&page).then_some(page)
}

/// Requested page, as sent to the page endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageQuery {
    pub current_page: u64,
    pub page_size: u64,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            current_page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageQuery {
    pub fn new(current_page: u64, page_size: u64) -> Self {
        Self {
            current_page,
            page_size,
        }
    }

    /// Reads `currentPage` / `pageSize` from raw query parameters.
    /// Missing or malformed values fall back to the defaults; the page size is
    /// clamped to `[1, MAX_PAGE_SIZE]`.
    pub fn from_params(params: &BTreeMap<String, String>) -> Self {
        let read = |key: &str| params.get(key).and_then(|v| v.trim().parse::<u64>().ok());

        let current_page = read(CURRENT_PAGE_KEY).filter(|p| *p >= 1).unwrap_or(1);
        let page_size = read(PAGE_SIZE_KEY)
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE);

        Self {
            current_page,
            page_size,
        }
    }

    pub fn to_params(&self) -> BTreeMap<String, String> {
        BTreeMap::from([
            (CURRENT_PAGE_KEY.to_string(), self.current_page.to_string()),
            (PAGE_SIZE_KEY.to_string(), self.page_size.to_string()),
        ])
    }

    /// Row offset of the first item on this page, capped at [`MAX_OFFSET`]
    pub fn offset(&self) -> u64 {
        self.current_page
            .saturating_sub(1)
            .checked_mul(self.page_size)
            .map_or(MAX_OFFSET, |offset| offset.min(MAX_OFFSET))
    }
}

/// Paging state owned by a list controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    pub current_page: u64,
    pub page_size: u64,
    pub total_num: u64,
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            current_page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            total_num: 0,
        }
    }
}

impl PageState {
    pub fn total_pages(&self) -> u64 {
        total_pages(self.total_num, self.page_size)
    }

    pub fn query(&self) -> PageQuery {
        PageQuery::new(self.current_page, self.page_size)
    }

    /// Moves to `page` if it exists and differs from the current one.
    pub fn go_to(&mut self, page: u64) -> bool {
        if page == self.current_page || !(1..=self.total_pages()).contains(&page) {
            return false;
        }
        self.current_page = page;
        true
    }

    /// Changes the page size and returns to the first page.
    pub fn set_page_size(&mut self, page_size: u64) -> bool {
        if page_size == 0 || page_size == self.page_size {
            return false;
        }
        self.page_size = page_size;
        self.current_page = 1;
        true
    }

    pub fn reset(&mut self) {
        self.current_page = 1;
    }

    /// Stores the total reported by the server. Returns `true` when the current
    /// page no longer exists and was moved back to the last one.
    pub fn set_total(&mut self, total_num: u64) -> bool {
        self.total_num = total_num;
        let last = self.total_pages().max(1);
        if self.current_page > last {
            self.current_page = last;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_is_ceiling_division() {
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(1, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(95, 20), 5);
        assert_eq!(total_pages(5, 0), 0);
    }

    #[test]
    fn window_never_leaves_page_range() {
        for total_num in 0..120u64 {
            for page_size in [1u64, 3, 10, 20] {
                let pages = total_pages(total_num, page_size);
                for current in 0..=pages + 2 {
                    let window = page_window(current, pages, PAGE_WINDOW);
                    assert!(window.len() as u64 <= PAGE_WINDOW);
                    assert!(window.iter().all(|p| (1..=pages).contains(p)));
                    if pages > 0 {
                        assert!(!window.is_empty());
                    }
                }
            }
        }
    }

    #[test]
    fn window_is_centered_on_current_page() {
        assert_eq!(page_window(1, 10, 5), vec![1, 2, 3, 4, 5]);
        assert_eq!(page_window(5, 10, 5), vec![3, 4, 5, 6, 7]);
        assert_eq!(page_window(10, 10, 5), vec![6, 7, 8, 9, 10]);
        assert_eq!(page_window(2, 3, 5), vec![1, 2, 3]);
        assert!(page_window(1, 0, 5).is_empty());
    }

    #[test]
    fn jump_ignores_out_of_range_input() {
        assert_eq!(parse_jump("3", 5), Some(3));
        assert_eq!(parse_jump(" 5 ", 5), Some(5));
        assert_eq!(parse_jump("0", 5), None);
        assert_eq!(parse_jump("6", 5), None);
        assert_eq!(parse_jump("abc", 5), None);
        assert_eq!(parse_jump("-1", 5), None);
        assert_eq!(parse_jump("1", 0), None);
    }

    #[test]
    fn query_params_fall_back_to_defaults() {
        let params = BTreeMap::from([
            ("currentPage".to_string(), "0".to_string()),
            ("pageSize".to_string(), "100000".to_string()),
        ]);
        let query = PageQuery::from_params(&params);
        assert_eq!(query.current_page, 1);
        assert_eq!(query.page_size, MAX_PAGE_SIZE);

        let query = PageQuery::from_params(&BTreeMap::new());
        assert_eq!(query, PageQuery::default());

        let query = PageQuery::new(3, 20);
        assert_eq!(PageQuery::from_params(&query.to_params()), query);
        assert_eq!(query.offset(), 40);
    }

    #[test]
    fn offset_of_a_huge_page_stays_in_sql_range() {
        let params = BTreeMap::from([
            ("currentPage".to_string(), u64::MAX.to_string()),
            ("pageSize".to_string(), "500".to_string()),
        ]);
        let query = PageQuery::from_params(&params);
        assert_eq!(query.current_page, u64::MAX);
        assert_eq!(query.offset(), MAX_OFFSET);

        assert_eq!(PageQuery::new(u64::MAX, 1).offset(), MAX_OFFSET);
        assert_eq!(PageQuery::new(1, MAX_PAGE_SIZE).offset(), 0);
        assert_eq!(PageQuery::new(0, 10).offset(), 0);
    }

    #[test]
    fn page_state_transitions() {
        let mut state = PageState::default();
        assert!(!state.go_to(2), "no pages before the first fetch");

        state.set_total(35);
        assert_eq!(state.total_pages(), 4);
        assert!(state.go_to(4));
        assert!(!state.go_to(4));
        assert!(!state.go_to(5));

        assert!(state.set_page_size(20));
        assert_eq!(state.current_page, 1);
        assert_eq!(state.total_pages(), 2);

        state.go_to(2);
        assert!(state.set_total(20), "page 2 disappeared");
        assert_eq!(state.current_page, 1);

        assert!(!state.set_total(0));
        assert_eq!(state.current_page, 1);
    }
}
