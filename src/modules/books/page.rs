/// Rows shown per page of the book table.
pub const ITEMS_PER_PAGE: usize = 5;

/// Number of pages for `count` rows. An empty list still has one (empty) page.
pub fn total_pages(count: usize) -> usize {
    count.div_ceil(ITEMS_PER_PAGE).max(1)
}

/// Rows of 1-based page `n`: `[(n-1)*ITEMS_PER_PAGE, n*ITEMS_PER_PAGE)`.
///
/// Pages are not clamped; page 0 or a page past the end is simply empty.
pub fn page<T>(items: &[T], n: usize) -> &[T] {
    let Some(index) = n.checked_sub(1) else {
        return &[];
    };
    let start = index.saturating_mul(ITEMS_PER_PAGE).min(items.len());
    let end = start.saturating_add(ITEMS_PER_PAGE).min(items.len());
    &items[start..end]
}

/// Current page of the list view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    pub current_page: usize,
}

impl Default for PageState {
    fn default() -> Self {
        Self { current_page: 1 }
    }
}

/// Which pagination buttons are usable, as derived from the current and total pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageControls {
    pub current_page: usize,
    pub total_pages: usize,
}

impl PageControls {
    pub fn new(current_page: usize, total_pages: usize) -> Self {
        Self {
            current_page,
            total_pages,
        }
    }

    /// Controls are only drawn when there is more than one page.
    pub fn visible(&self) -> bool {
        self.total_pages > 1
    }

    pub fn first_enabled(&self) -> bool {
        self.current_page != 1
    }

    pub fn prev_enabled(&self) -> bool {
        self.current_page != 1
    }

    pub fn next_enabled(&self) -> bool {
        self.current_page != self.total_pages
    }

    pub fn last_enabled(&self) -> bool {
        self.current_page != self.total_pages
    }

    /// Numbered items `1..=total_pages`, paired with whether each is the active one.
    pub fn items(&self) -> impl Iterator<Item = (usize, bool)> + '_ {
        (1..=self.total_pages).map(move |n| (n, n == self.current_page))
    }
}
