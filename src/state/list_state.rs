//! State of one list screen.
//!
//! `ListViewState` bundles the four state cells a list screen owns (query,
//! filters, sort, page) together with the screen definition that validates
//! them. The host mutates it through the transitions below and hands it to
//! [`crate::view_state::ListViewEngine`] to get a view.

use crate::config::ScreenConfig;
use crate::model::{FilterName, SortKey, StateError};
use crate::state::{FilterSelection, FilterState, PageSize, PageState, SearchDebouncer, TimerHandle};
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

// ===== ListViewState =====

/// Query, filter, sort and page state for one screen session.
///
/// # Page reset
///
/// Changing the raw query, any filter, or the sort key returns to page 1, and
/// so does the query settling. Transitions that leave a value unchanged do not.
#[derive(Debug, Clone)]
pub struct ListViewState {
    screen: Arc<ScreenConfig>,
    query: SearchDebouncer,
    filters: FilterState,
    sort: Option<SortKey>,
    page: PageState,
}

impl ListViewState {
    /// Mount a screen: empty query, every filter "all", default sort, page 1
    /// at the screen's default size.
    pub fn new(screen: Arc<ScreenConfig>) -> Self {
        Self {
            query: SearchDebouncer::new(screen.debounce()),
            filters: FilterState::new(),
            sort: screen.default_sort().cloned(),
            page: PageState::new(screen.default_page_size()),
            screen,
        }
    }

    /// Screen definition this state is validated against.
    pub fn screen(&self) -> &Arc<ScreenConfig> {
        &self.screen
    }

    /// Query cell.
    pub fn query(&self) -> &SearchDebouncer {
        &self.query
    }

    /// Filter selections.
    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    /// Selected comparator, if the screen registers any.
    pub fn sort(&self) -> Option<&SortKey> {
        self.sort.as_ref()
    }

    /// Page position.
    pub fn page(&self) -> PageState {
        self.page
    }

    // ===== Query =====

    /// A keystroke in the search box.
    pub fn set_query(&mut self, raw: impl Into<String>, now: Instant) -> Option<TimerHandle> {
        let raw = raw.into();
        let changed = raw != self.query.raw();
        let handle = self.query.set_raw(raw, now)?;
        if changed {
            self.page.reset();
        }
        Some(handle)
    }

    /// Event loop tick. Returns true if the settled query changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let settled = self.query.poll(now);
        self.after_settle(settled)
    }

    /// Deliver a timer callback. Returns true if the settled query changed.
    pub fn fire_search_timer(&mut self, handle: TimerHandle) -> bool {
        let settled = self.query.fire(handle);
        self.after_settle(settled)
    }

    /// Settle the query now (Enter pressed). Returns true if it changed.
    pub fn submit_query(&mut self) -> bool {
        let settled = self.query.flush();
        self.after_settle(settled)
    }

    /// A newly settled query is a new result set: back to page 1, even if
    /// the user paged through the old results while typing.
    fn after_settle(&mut self, settled: bool) -> bool {
        if settled {
            self.page.reset();
        }
        settled
    }

    // ===== Filters =====

    /// Select `value` for the filter `name`. `"all"` clears it.
    ///
    /// Returns true if the selection changed.
    ///
    /// # Errors
    ///
    /// [`StateError::UnknownFilter`] if the screen has no such filter,
    /// [`StateError::DisallowedValue`] if the value is not offered.
    pub fn set_filter(&mut self, name: &str, value: &str) -> Result<bool, StateError> {
        let (filter_name, spec) =
            self.screen
                .filter(name)
                .ok_or_else(|| StateError::UnknownFilter {
                    name: name.to_string(),
                })?;

        let selection = FilterSelection::parse(value);
        if let FilterSelection::Value(v) = &selection {
            if !spec.allows(v) {
                return Err(StateError::DisallowedValue {
                    filter: name.to_string(),
                    value: v.clone(),
                    allowed: spec.allowed_values.join(", "),
                });
            }
        }

        let filter_name: FilterName = filter_name.clone();
        let changed = self.filters.set(filter_name, selection);
        if changed {
            debug!(filter = name, value, "filter changed");
            self.page.reset();
        }
        Ok(changed)
    }

    /// Reset every filter to "all". Returns true if anything changed.
    pub fn clear_filters(&mut self) -> bool {
        let changed = self.filters.clear();
        if changed {
            self.page.reset();
        }
        changed
    }

    // ===== Sort =====

    /// Select a registered comparator. Returns true if the sort changed.
    ///
    /// # Errors
    ///
    /// [`StateError::UnknownSortKey`] if the screen registers no such key.
    pub fn set_sort(&mut self, key: &str) -> Result<bool, StateError> {
        let (sort_key, _) = self
            .screen
            .sort_option(key)
            .ok_or_else(|| StateError::UnknownSortKey {
                key: key.to_string(),
            })?;

        if self.sort.as_ref() == Some(sort_key) {
            return Ok(false);
        }
        self.sort = Some(sort_key.clone());
        debug!(sort = key, "sort changed");
        self.page.reset();
        Ok(true)
    }

    // ===== Paging =====

    /// Change the page size. Always returns to page 1.
    ///
    /// # Errors
    ///
    /// [`StateError::InvalidPageSize`] for zero.
    pub fn set_page_size(&mut self, size: usize) -> Result<(), StateError> {
        let size = PageSize::new(size)?;
        self.page.set_page_size(size);
        Ok(())
    }

    /// Jump to `page`; no-op outside `[1, page_count]`.
    pub fn go_to_page(&mut self, page: usize, page_count: usize) -> bool {
        self.page.go_to(page, page_count)
    }

    /// Next page, if enabled.
    pub fn next_page(&mut self, page_count: usize) -> bool {
        self.page.next(page_count)
    }

    /// Previous page, if enabled.
    pub fn previous_page(&mut self, page_count: usize) -> bool {
        self.page.previous(page_count)
    }

    /// First page.
    pub fn first_page(&mut self, page_count: usize) -> bool {
        self.page.first(page_count)
    }

    /// Last page.
    pub fn last_page(&mut self, page_count: usize) -> bool {
        self.page.last(page_count)
    }

    // ===== Teardown =====

    /// Screen unmount: cancel the pending search timer. Later query input is
    /// ignored.
    pub fn dispose(&mut self) {
        self.query.dispose();
    }
}

#[cfg(test)]
#[path = "list_state_tests.rs"]
mod tests;
