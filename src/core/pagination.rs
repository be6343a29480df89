use serde::{Deserialize, Serialize};

use crate::core::input::parse_page_number;

/// Default rows per page
pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// Page size requested in all-mode, above any realistic total
pub const ALL_MODE_PAGE_SIZE: u64 = 100_000;

/// Page sizes used by the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSizes {
    pub default: u64,
    pub all_mode: u64,
}

impl Default for PageSizes {
    fn default() -> Self {
        Self {
            default: DEFAULT_PAGE_SIZE,
            all_mode: ALL_MODE_PAGE_SIZE,
        }
    }
}

/// Page-wise retrieval state
///
/// `total_pages` only ever comes from the total the data source reports,
/// never from the number of rows currently loaded. Every method returns
/// `true` when the current page or page size changed, which means the
/// caller has to fetch again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationState {
    pub current_page: u64,
    pub page_size: u64,
    pub total_pages: u64,
    pub all_mode: bool,
    #[serde(skip)]
    sizes: PageSizes,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self::new(PageSizes::default())
    }
}

impl PaginationState {
    pub fn new(sizes: PageSizes) -> Self {
        Self {
            current_page: 1,
            page_size: sizes.default.max(1),
            total_pages: 0,
            all_mode: false,
            sizes,
        }
    }

    /// Jump to page `n`; pages outside `1..=total_pages` are rejected
    pub fn go_to_page(&mut self, n: u64) -> bool {
        if n < 1 || n > self.total_pages {
            tracing::debug!("Rejected page {} (total pages: {})", n, self.total_pages);
            return false;
        }
        self.set_page(n)
    }

    /// Jump to a manually typed page number
    ///
    /// Blank or malformed text leaves the state alone.
    pub fn go_to_page_input(&mut self, input: &str) -> bool {
        match parse_page_number(input) {
            Ok(Some(n)) => self.go_to_page(n),
            Ok(None) => false,
            Err(e) => {
                tracing::debug!("Ignoring page input: {}", e);
                false
            }
        }
    }

    pub fn next(&mut self) -> bool {
        if self.current_page < self.total_pages {
            self.set_page(self.current_page + 1)
        } else {
            false
        }
    }

    pub fn prev(&mut self) -> bool {
        if self.current_page > 1 {
            self.set_page(self.current_page - 1)
        } else {
            false
        }
    }

    /// Switch between the default page size and the all-mode sentinel
    ///
    /// Both directions go back to page 1.
    pub fn toggle_all_mode(&mut self) -> bool {
        self.all_mode = !self.all_mode;
        self.page_size = if self.all_mode {
            self.sizes.all_mode.max(1)
        } else {
            self.sizes.default.max(1)
        };
        self.current_page = 1;
        true
    }

    /// Record the total the data source reported for the last fetch
    ///
    /// Clamps the current page when the total shrank below it; the return
    /// value says whether that happened.
    pub fn apply_total(&mut self, total: u64) -> bool {
        self.total_pages = total.div_ceil(self.page_size);
        let last = self.total_pages.max(1);
        if self.current_page > last {
            tracing::debug!("Clamping page {} to {}", self.current_page, last);
            self.current_page = last;
            return true;
        }
        false
    }

    pub fn is_first_page(&self) -> bool {
        self.current_page <= 1
    }

    pub fn is_last_page(&self) -> bool {
        self.current_page >= self.total_pages
    }

    fn set_page(&mut self, n: u64) -> bool {
        let changed = self.current_page != n;
        self.current_page = n;
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_total(total: u64) -> PaginationState {
        let mut state = PaginationState::default();
        state.apply_total(total);
        state
    }

    #[test]
    fn test_total_pages_rounds_up() {
        assert_eq!(with_total(25).total_pages, 3);
        assert_eq!(with_total(30).total_pages, 3);
        assert_eq!(with_total(0).total_pages, 0);
        assert_eq!(with_total(1).total_pages, 1);
    }

    #[test]
    fn test_go_to_page_bounds() {
        let mut state = with_total(25);

        assert!(!state.go_to_page(0));
        assert!(!state.go_to_page(4));
        assert_eq!(state.current_page, 1);

        assert!(state.go_to_page(3));
        assert_eq!(state.current_page, 3);

        // Same page is not a change
        assert!(!state.go_to_page(3));
    }

    #[test]
    fn test_go_to_page_input() {
        let mut state = with_total(25);

        assert!(!state.go_to_page_input(""));
        assert!(!state.go_to_page_input("abc"));
        assert!(!state.go_to_page_input("9"));
        assert_eq!(state.current_page, 1);

        assert!(state.go_to_page_input(" 2 "));
        assert_eq!(state.current_page, 2);
    }

    #[test]
    fn test_next_prev_boundaries() {
        let mut state = with_total(25);

        assert!(!state.prev());
        assert!(state.next());
        assert!(state.next());
        assert!(!state.next());
        assert_eq!(state.current_page, 3);
        assert!(state.is_last_page());

        assert!(state.prev());
        assert_eq!(state.current_page, 2);
    }

    #[test]
    fn test_no_pages_means_no_navigation() {
        let mut state = with_total(0);

        assert!(!state.next());
        assert!(!state.prev());
        assert!(!state.go_to_page(1));
        assert_eq!(state.current_page, 1);
    }

    #[test]
    fn test_toggle_all_mode() {
        let mut state = with_total(25);
        state.go_to_page(2);

        assert!(state.toggle_all_mode());
        assert!(state.all_mode);
        assert_eq!(state.page_size, ALL_MODE_PAGE_SIZE);
        assert_eq!(state.current_page, 1);

        state.apply_total(25);
        assert_eq!(state.total_pages, 1);

        assert!(state.toggle_all_mode());
        assert!(!state.all_mode);
        assert_eq!(state.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(state.current_page, 1);
    }

    #[test]
    fn test_apply_total_clamps() {
        let mut state = with_total(50);
        state.go_to_page(5);

        assert!(state.apply_total(12));
        assert_eq!(state.total_pages, 2);
        assert_eq!(state.current_page, 2);

        assert!(state.apply_total(0));
        assert_eq!(state.current_page, 1);
        assert!(!state.apply_total(0));
    }

    #[test]
    fn test_custom_sizes() {
        let mut state = PaginationState::new(PageSizes { default: 5, all_mode: 500 });
        assert_eq!(state.page_size, 5);

        state.toggle_all_mode();
        assert_eq!(state.page_size, 500);
    }
}
