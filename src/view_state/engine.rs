//! Memoized view computation.
//!
//! The engine keeps two memo levels:
//!
//! 1. the filtered and sorted ordering, keyed on the record set (by `Arc`
//!    identity), screen, settled query, filters and sort key
//! 2. the page view, keyed on the ordering plus the page state
//!
//! Page navigation only touches level 2; typing into the search box touches
//! nothing until the query settles.

use crate::config::ScreenConfig;
use crate::model::{Record, RecordSet, SortKey};
use crate::state::{FilterState, ListViewState, PageState};
use crate::view_state::filter::PredicateFilterSet;
use crate::view_state::page_window::build_window;
use crate::view_state::paginate::{page_count, paginate};
use crate::view_state::sort::SortComparator;
use crate::view_state::view::View;
use std::sync::Arc;
use tracing::{debug, trace};

/// Positions of matching records, in display order.
pub fn compute_ordering<R: Record>(
    records: &[R],
    screen: &ScreenConfig,
    query: &str,
    filters: &FilterState,
    sort: Option<&SortKey>,
) -> Vec<usize> {
    let predicates = PredicateFilterSet::new(screen, query, filters);
    let mut order = predicates.apply(records);

    if let Some(spec) = sort.and_then(|key| screen.sort_options().get(key)) {
        SortComparator::from_spec(spec).sort_indices(records, &mut order);
    }
    order
}

/// Slice an ordering into the view for `page`.
///
/// A page past the end (the collection shrank since the user navigated) is
/// clamped to the last page.
pub fn slice_view<R: Clone>(records: &[R], order: &[usize], page: PageState) -> View<R> {
    let pages = page_count(order.len(), page.page_size().get());
    let mut page = page;
    if page.page_number() > pages {
        page.go_to(pages, pages);
    }
    let slice = paginate(order.len(), page);
    let page_number = page.page_number();

    View {
        items: order[slice.range].iter().map(|&i| records[i].clone()).collect(),
        total_count: slice.total_count,
        page_count: slice.page_count,
        page_number,
        page_size: page.page_size().get(),
        page_numbers: build_window(page_number, slice.page_count),
        has_previous: page.can_go_previous(),
        has_next: page.can_go_next(slice.page_count),
    }
}

/// Unmemoized view of `records` under `state`.
pub fn build_view<R: Record + Clone>(records: &[R], state: &ListViewState) -> View<R> {
    let order = compute_ordering(
        records,
        state.screen(),
        state.query().debounced(),
        state.filters(),
        state.sort(),
    );
    slice_view(records, &order, state.page())
}

/// Memo hit/miss counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MemoStats {
    /// Ordering reused.
    pub ordering_hits: u64,
    /// Ordering recomputed.
    pub ordering_misses: u64,
    /// Page view reused.
    pub page_hits: u64,
    /// Page view re-sliced.
    pub page_misses: u64,
}

#[derive(Debug)]
struct OrderingMemo<R> {
    records: RecordSet<R>,
    screen: Arc<ScreenConfig>,
    query: String,
    filters: FilterState,
    sort: Option<SortKey>,
    order: Vec<usize>,
    generation: u64,
}

impl<R> OrderingMemo<R> {
    fn matches(&self, records: &RecordSet<R>, state: &ListViewState) -> bool {
        Arc::ptr_eq(&self.records, records)
            && (Arc::ptr_eq(&self.screen, state.screen()) || *self.screen == **state.screen())
            && self.query == state.query().debounced()
            && self.filters == *state.filters()
            && self.sort.as_ref() == state.sort()
    }
}

#[derive(Debug)]
struct PageMemo<R> {
    generation: u64,
    page: PageState,
    view: Arc<View<R>>,
}

/// Computes [`View`]s for one screen, reusing work across calls.
///
/// The memo holds a clone of the last record set's `Arc`, so the identity it
/// compares against stays valid.
#[derive(Debug)]
pub struct ListViewEngine<R> {
    ordering: Option<OrderingMemo<R>>,
    page: Option<PageMemo<R>>,
    generation: u64,
    stats: MemoStats,
}

impl<R: Record + Clone> ListViewEngine<R> {
    /// Empty memo.
    pub fn new() -> Self {
        Self {
            ordering: None,
            page: None,
            generation: 0,
            stats: MemoStats::default(),
        }
    }

    /// View of `records` under `state`.
    ///
    /// Calling again with the same record set and an equal state returns the
    /// same `Arc`.
    pub fn compute_view(&mut self, records: &RecordSet<R>, state: &ListViewState) -> Arc<View<R>> {
        let generation = self.refresh_ordering(records, state);
        let page = state.page();

        if let Some(memo) = &self.page {
            if memo.generation == generation && memo.page == page {
                self.stats.page_hits += 1;
                trace!(page = page.page_number(), "page view reused");
                return Arc::clone(&memo.view);
            }
        }

        self.stats.page_misses += 1;
        let order: &[usize] = self
            .ordering
            .as_ref()
            .map(|memo| memo.order.as_slice())
            .unwrap_or_default();
        let view = Arc::new(slice_view(records, order, page));
        trace!(
            page = page.page_number(),
            items = view.items.len(),
            "page view sliced"
        );
        self.page = Some(PageMemo {
            generation,
            page,
            view: Arc::clone(&view),
        });
        view
    }

    /// Hit/miss counters since construction or the last [`ListViewEngine::clear`].
    pub fn stats(&self) -> MemoStats {
        self.stats
    }

    /// Drop both memo levels and reset the counters.
    pub fn clear(&mut self) {
        self.ordering = None;
        self.page = None;
        self.stats = MemoStats::default();
    }

    /// Make sure the ordering memo matches; returns its generation.
    fn refresh_ordering(&mut self, records: &RecordSet<R>, state: &ListViewState) -> u64 {
        if let Some(memo) = &self.ordering {
            if memo.matches(records, state) {
                self.stats.ordering_hits += 1;
                trace!("ordering reused");
                return memo.generation;
            }
        }

        self.stats.ordering_misses += 1;
        self.generation += 1;
        let order = compute_ordering(
            records,
            state.screen(),
            state.query().debounced(),
            state.filters(),
            state.sort(),
        );
        debug!(
            screen = %state.screen().name(),
            records = records.len(),
            matched = order.len(),
            query = state.query().debounced(),
            "ordering recomputed"
        );
        self.ordering = Some(OrderingMemo {
            records: Arc::clone(records),
            screen: Arc::clone(state.screen()),
            query: state.query().debounced().to_string(),
            filters: state.filters().clone(),
            sort: state.sort().cloned(),
            order,
            generation: self.generation,
        });
        self.generation
    }
}

impl<R: Record + Clone> Default for ListViewEngine<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
