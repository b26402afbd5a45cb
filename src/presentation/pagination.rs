//! Table pagination state.
//!
//! The browser owns the live state; the server uses the same rules to render
//! the first page so the table is usable before the script runs.

use std::ops::Range;

pub const PAGE_SIZE_OPTIONS: [usize; 4] = [10, 25, 50, 100];
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Pages on either side of the current one in the number strip.
const WINDOW_RADIUS: usize = 3;
const MAX_PAGE_BUTTONS: usize = 2 * WINDOW_RADIUS + 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSize {
    Rows(usize),
    All,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page { number: usize, active: bool },
    Ellipsis,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    total_rows: usize,
    page_size: PageSize,
    current_page: usize,
}

impl Pagination {
    pub fn new(total_rows: usize, page_size: PageSize) -> Self {
        Self {
            total_rows,
            page_size,
            current_page: 1,
        }
    }

    /// Changing the page size always goes back to the first page.
    pub fn with_page_size(self, page_size: PageSize) -> Self {
        Self::new(self.total_rows, page_size)
    }

    pub fn rows_per_page(&self) -> usize {
        match self.page_size {
            PageSize::Rows(rows) => rows.max(1),
            PageSize::All => self.total_rows.max(1),
        }
    }

    pub fn total_rows(&self) -> usize {
        self.total_rows
    }

    pub fn total_pages(&self) -> usize {
        self.total_rows.div_ceil(self.rows_per_page())
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn go_to(&mut self, page: usize) {
        self.current_page = page.clamp(1, self.total_pages().max(1));
    }

    pub fn next(&mut self) {
        self.go_to(self.current_page + 1);
    }

    pub fn previous(&mut self) {
        self.go_to(self.current_page.saturating_sub(1));
    }

    pub fn last(&mut self) {
        self.go_to(self.total_pages());
    }

    pub fn visible_range(&self) -> Range<usize> {
        let start = ((self.current_page - 1) * self.rows_per_page()).min(self.total_rows);
        let end = (start + self.rows_per_page()).min(self.total_rows);
        start..end
    }

    pub fn is_visible(&self, row_index: usize) -> bool {
        self.visible_range().contains(&row_index)
    }

    /// One-based "showing X-Y" bounds; (0, 0) for an empty table.
    pub fn showing(&self) -> (usize, usize) {
        let range = self.visible_range();
        if self.total_rows == 0 {
            (0, 0)
        } else {
            (range.start + 1, range.end)
        }
    }

    pub fn is_first_page(&self) -> bool {
        self.current_page == 1
    }

    pub fn is_last_page(&self) -> bool {
        self.current_page >= self.total_pages()
    }

    /// Numbered buttons around the current page, with the first and last page
    /// pinned and ellipses for the gaps. Empty when there is a single page.
    pub fn page_items(&self) -> Vec<PageItem> {
        let total = self.total_pages();
        if total <= 1 {
            return Vec::new();
        }

        let current = self.current_page;
        let mut start = current.saturating_sub(WINDOW_RADIUS).max(1);
        let mut end = (current + WINDOW_RADIUS).min(total);

        if current <= WINDOW_RADIUS + 1 {
            end = MAX_PAGE_BUTTONS.min(total);
        }
        if current + WINDOW_RADIUS >= total {
            start = total.saturating_sub(MAX_PAGE_BUTTONS - 1).max(1);
        }

        let page = |number: usize| PageItem::Page {
            number,
            active: number == current,
        };

        let mut items = Vec::with_capacity(MAX_PAGE_BUTTONS + 4);
        if start > 1 {
            items.push(page(1));
            if start > 2 {
                items.push(PageItem::Ellipsis);
            }
        }
        items.extend((start..=end).map(page));
        if end < total {
            if end < total - 1 {
                items.push(PageItem::Ellipsis);
            }
            items.push(page(total));
        }
        items
    }
}
