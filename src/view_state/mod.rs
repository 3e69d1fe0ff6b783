//! View layer: turns records plus list state into a page view.
//!
//! Everything here is pure. The only state is the engine's memo.
//!
//! # Module Structure
//!
//! - `filter`: PredicateFilterSet - text search AND categorical filters
//! - `sort`: SortComparator - typed, stable comparators
//! - `paginate`: PageSlice - page range and counts
//! - `page_window`: PageMarker - compact page strip with ellipses
//! - `view`: View - the computed result
//! - `engine`: ListViewEngine - two-level memoized view computation

pub mod engine;
pub mod filter;
pub mod page_window;
pub mod paginate;
pub mod sort;
pub mod view;

pub use engine::{build_view, compute_ordering, slice_view, ListViewEngine, MemoStats};
pub use filter::PredicateFilterSet;
pub use page_window::{build_window, render_strip, PageMarker, ELLIPSIS};
pub use paginate::{page_count, paginate, PageSlice};
pub use sort::SortComparator;
pub use view::View;
