//! # Pagination
//!
//! The page window is derived on every render from `total`, the page size and the
//! page in the address. It is never stored.
//!
//! - `total_pages = ceil(total / page_size)`; zero items means zero pages, and the
//!   pager is hidden in favor of a plain count.
//! - An out-of-range page in the address is not corrected. The window reports an
//!   empty page (`showing_from = showing_to = 0`) with both moves disabled.
//! - Moves produce `page` patches; page 1 is written by removing the key.

use crate::address::{Patch, PAGE};
use crate::config::EntityName;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageWindow {
    pub current_page: u32,
    pub total_pages: u32,
    pub total: u64,
    pub showing_from: u64,
    pub showing_to: u64,
    pub has_previous: bool,
    pub has_next: bool,
    /// Whether a pager should be shown at all.
    pub visible: bool,
}

/// Offset of the first item on `page` (1-based).
pub fn offset(page: u32, page_size: u32) -> u64 {
    u64::from(page.max(1) - 1) * u64::from(page_size)
}

pub fn compute_window(total: u64, page_size: u32, current_page: u32) -> PageWindow {
    let page_size = page_size.max(1);
    let current_page = current_page.max(1);
    let total_pages = u32::try_from(total.div_ceil(u64::from(page_size))).unwrap_or(u32::MAX);

    let start = offset(current_page, page_size);
    let (showing_from, showing_to) = if start < total {
        (start + 1, (start + u64::from(page_size)).min(total))
    } else {
        (0, 0)
    };

    PageWindow {
        current_page,
        total_pages,
        total,
        showing_from,
        showing_to,
        has_previous: current_page > 1 && current_page <= total_pages,
        has_next: current_page < total_pages,
        visible: total_pages > 0,
    }
}

/// Patch that moves to `page`.
pub fn page_patch(page: u32) -> Patch {
    if page <= 1 {
        Patch::new().remove(PAGE)
    } else {
        Patch::new().set(PAGE, page)
    }
}

impl PageWindow {
    pub fn next_page(&self) -> Option<Patch> {
        self.has_next.then(|| page_patch(self.current_page + 1))
    }

    pub fn previous_page(&self) -> Option<Patch> {
        self.has_previous
            .then(|| page_patch(self.current_page - 1))
    }

    /// Jump to an arbitrary page. Only pages inside the window are reachable.
    pub fn jump_to(&self, page: u32) -> Option<Patch> {
        (page >= 1 && page <= self.total_pages).then(|| page_patch(page))
    }

    /// "Showing 1–20 of 45 jobs", or a plain count when there is nothing to page.
    pub fn summary(&self, name: &EntityName) -> String {
        let noun = name.for_count(self.total);
        if self.showing_from == 0 {
            format!("{} {}", self.total, noun)
        } else {
            format!(
                "Showing {}–{} of {} {}",
                self.showing_from, self.showing_to, self.total, noun
            )
        }
    }
}
