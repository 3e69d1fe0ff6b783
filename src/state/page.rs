//! Page state and navigation transitions (pure).
//!
//! Navigation outside `[1, page_count]` is a silent no-op: controls that would
//! leave the range are reported as disabled instead of failing.

use crate::model::StateError;
use serde::Serialize;
use std::fmt;
use std::num::NonZeroUsize;

/// Number of records per page. Never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PageSize(NonZeroUsize);

impl PageSize {
    /// Default page size used by the built-in screens.
    pub const DEFAULT: PageSize = match NonZeroUsize::new(10) {
        Some(n) => PageSize(n),
        None => unreachable!(),
    };

    /// Smart constructor: rejects zero.
    pub fn new(size: usize) -> Result<Self, StateError> {
        NonZeroUsize::new(size)
            .map(Self)
            .ok_or(StateError::InvalidPageSize)
    }

    /// Page size as a plain integer.
    pub fn get(self) -> usize {
        self.0.get()
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Current page position. `page_number` is 1-based.
///
/// `page_number` is not bounded by the page count here; the page count depends
/// on the filtered collection, which this type does not see. Navigation methods
/// take the current page count and refuse to leave `[1, page_count]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PageState {
    page_number: usize,
    page_size: PageSize,
}

impl PageState {
    /// First page with the given size.
    pub fn new(page_size: PageSize) -> Self {
        Self {
            page_number: 1,
            page_size,
        }
    }

    /// Current 1-based page number.
    pub fn page_number(&self) -> usize {
        self.page_number
    }

    /// Current page size.
    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    /// Back to page 1, keeping the size.
    pub fn reset(&mut self) {
        self.page_number = 1;
    }

    /// Change the page size. Always returns to page 1, since the old page's
    /// offset means nothing under a different size.
    pub fn set_page_size(&mut self, page_size: PageSize) {
        self.page_size = page_size;
        self.page_number = 1;
    }

    /// Jump to `page`. No-op unless `1 <= page <= page_count`.
    ///
    /// Returns true if the page changed.
    pub fn go_to(&mut self, page: usize, page_count: usize) -> bool {
        if page < 1 || page > page_count.max(1) || page == self.page_number {
            return false;
        }
        self.page_number = page;
        true
    }

    /// Go to page 1.
    pub fn first(&mut self, page_count: usize) -> bool {
        self.go_to(1, page_count)
    }

    /// Go to the last page.
    pub fn last(&mut self, page_count: usize) -> bool {
        self.go_to(page_count.max(1), page_count)
    }

    /// Go back one page, if there is one.
    pub fn previous(&mut self, page_count: usize) -> bool {
        if !self.can_go_previous() {
            return false;
        }
        self.go_to(self.page_number - 1, page_count)
    }

    /// Go forward one page, if there is one.
    pub fn next(&mut self, page_count: usize) -> bool {
        if !self.can_go_next(page_count) {
            return false;
        }
        self.go_to(self.page_number + 1, page_count)
    }

    /// Whether "previous"/"first" controls are enabled.
    pub fn can_go_previous(&self) -> bool {
        self.page_number > 1
    }

    /// Whether "next"/"last" controls are enabled.
    pub fn can_go_next(&self, page_count: usize) -> bool {
        self.page_number < page_count
    }
}

impl Default for PageState {
    fn default() -> Self {
        Self::new(PageSize::default())
    }
}
