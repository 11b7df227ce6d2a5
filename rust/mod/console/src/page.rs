//! Pagination view over the QR page window.

use serde::Serialize;

use crate::state::QrSlice;

/// Page sizes offered to the user.
pub const PAGE_SIZES: [usize; 4] = [5, 10, 20, 50];

pub fn is_page_size(n: usize) -> bool {
    PAGE_SIZES.contains(&n)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageView {
    pub limit: usize,
    pub offset: usize,
    pub total_count: usize,
}

impl PageView {
    pub fn new(limit: usize, offset: usize, total_count: usize) -> Self {
        Self {
            limit,
            offset,
            total_count,
        }
    }

    pub fn of(qr: &QrSlice) -> Self {
        Self::new(qr.limit, qr.offset, qr.total_count)
    }

    pub fn page_index(&self) -> usize {
        if self.limit == 0 {
            return 0;
        }
        self.offset / self.limit
    }

    pub fn page_count(&self) -> usize {
        if self.limit == 0 {
            return 0;
        }
        self.total_count.div_ceil(self.limit)
    }

    pub fn offset_for_page(&self, page: usize) -> usize {
        page.saturating_mul(self.limit)
    }

    pub fn has_previous(&self) -> bool {
        self.offset > 0
    }

    pub fn has_next(&self) -> bool {
        self.offset.saturating_add(self.limit) < self.total_count
    }

    /// "Showing 11-20 of 25 QR codes".
    pub fn label(&self) -> String {
        let first = if self.total_count == 0 {
            0
        } else {
            self.offset.saturating_add(1).min(self.total_count)
        };
        let last = self.offset.saturating_add(self.limit).min(self.total_count);
        format!("Showing {}-{} of {} QR codes", first, last, self.total_count)
    }

    /// Controls are hidden while searching and when everything fits on one page.
    pub fn show_controls(&self, searching: bool) -> bool {
        !searching && self.total_count > self.limit
    }
}

/// Result line shown instead of the pagination label while searching.
pub fn search_label(matches: usize, query: &str) -> String {
    format!("Found {} QR code(s) matching \"{}\"", matches, query)
}
