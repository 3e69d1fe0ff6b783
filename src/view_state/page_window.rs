//! Compact page-number strip with ellipses.
//!
//! Up to five pages are listed in full. Beyond that the strip always shows the
//! first and last page, a window around the current page, and an ellipsis for
//! each elided run.

use serde::{Serialize, Serializer};
use std::fmt;

/// Pages listed in full up to this count.
pub const FULL_STRIP_MAX: usize = 5;

/// Rendered form of [`PageMarker::Ellipsis`].
pub const ELLIPSIS: &str = "…";

/// One slot of the page strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageMarker {
    /// A clickable 1-based page number.
    Page(usize),
    /// A run of elided pages.
    Ellipsis,
}

impl PageMarker {
    /// Page number, if this is not an ellipsis.
    pub fn page(self) -> Option<usize> {
        match self {
            PageMarker::Page(n) => Some(n),
            PageMarker::Ellipsis => None,
        }
    }
}

impl fmt::Display for PageMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageMarker::Page(n) => write!(f, "{}", n),
            PageMarker::Ellipsis => f.write_str(ELLIPSIS),
        }
    }
}

/// Pages serialize as numbers, ellipses as `"…"`.
impl Serialize for PageMarker {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PageMarker::Page(n) => serializer.serialize_u64(*n as u64),
            PageMarker::Ellipsis => serializer.serialize_str(ELLIPSIS),
        }
    }
}

/// Build the page strip for `current_page` of `page_count`.
///
/// `page_count` below 1 is treated as 1 and `current_page` is clamped into
/// `[1, page_count]` first.
///
/// # Invariants
/// - first marker is `Page(1)`, last is `Page(page_count)`
/// - page numbers strictly increase
/// - no two ellipses are adjacent
pub fn build_window(current_page: usize, page_count: usize) -> Vec<PageMarker> {
    let pc = page_count.max(1);
    let cur = current_page.clamp(1, pc);

    if pc <= FULL_STRIP_MAX {
        return (1..=pc).map(PageMarker::Page).collect();
    }

    let mut start = cur.saturating_sub(1).max(2);
    let mut end = (cur + 1).min(pc - 1);
    if cur <= 3 {
        end = 4.min(pc - 1);
    }
    if cur >= pc - 2 {
        start = (pc - 3).max(2);
    }

    let mut window = Vec::with_capacity(end - start + 5);
    window.push(PageMarker::Page(1));
    if start > 2 {
        window.push(PageMarker::Ellipsis);
    }
    window.extend((start..=end).map(PageMarker::Page));
    if end < pc - 1 {
        window.push(PageMarker::Ellipsis);
    }
    window.push(PageMarker::Page(pc));
    window
}

/// Render a strip as text, current page in brackets: `1 … 4 [5] 6 … 10`.
pub fn render_strip(window: &[PageMarker], current_page: usize) -> String {
    window
        .iter()
        .map(|marker| match marker {
            PageMarker::Page(n) if *n == current_page => format!("[{}]", n),
            other => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}
