//! Page slicing.

use crate::state::PageState;
use std::ops::Range;

/// Result of slicing an ordered collection of `total_count` items.
///
/// # Invariants
/// - `page_count >= 1`, even when `total_count == 0`
/// - `range.end <= total_count`
/// - `range.len() <= page_size`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSlice {
    /// Positions of the current page's items in the ordered collection.
    pub range: Range<usize>,
    /// Items before paging.
    pub total_count: usize,
    /// `max(1, ceil(total_count / page_size))`.
    pub page_count: usize,
}

/// Number of pages needed for `total_count` items.
pub fn page_count(total_count: usize, page_size: usize) -> usize {
    total_count.div_ceil(page_size.max(1)).max(1)
}

/// Slice `total_count` ordered items at `page`.
///
/// A page past the end yields an empty range, not an error.
pub fn paginate(total_count: usize, page: PageState) -> PageSlice {
    let size = page.page_size().get();
    let start = page
        .page_number()
        .saturating_sub(1)
        .saturating_mul(size)
        .min(total_count);
    let end = start.saturating_add(size).min(total_count);

    PageSlice {
        range: start..end,
        total_count,
        page_count: page_count(total_count, size),
    }
}
