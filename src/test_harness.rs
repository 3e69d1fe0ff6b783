//! Acceptance test harness for list screens.
//!
//! Wraps a record set, a [`ListViewState`] and a [`ListViewEngine`] behind an
//! API that reads like a user working a screen: typing, waiting, picking
//! filters and paging. Time is simulated, so debounce behavior is exact.

use crate::config::presets;
use crate::model::{AppError, DynamicRecord, Record, RecordSet, StateError};
use crate::source::load_records;
use crate::state::ListViewState;
use crate::view_state::{ListViewEngine, MemoStats, View};
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Simulated time between two keystrokes.
pub const KEYSTROKE_INTERVAL: Duration = Duration::from_millis(50);

/// Test harness for acceptance testing.
pub struct ListViewHarness {
    records: RecordSet<DynamicRecord>,
    state: ListViewState,
    engine: ListViewEngine<DynamicRecord>,
    now: Instant,
}

impl ListViewHarness {
    /// Load a JSON fixture into a built-in screen.
    ///
    /// # Errors
    /// * `Err(AppError)` - If the fixture cannot be loaded or the screen is unknown
    pub fn from_fixture(path: impl AsRef<Path>, screen: &str) -> Result<Self, AppError> {
        let loaded = load_records(path)?;
        Self::with_records(loaded.records, screen)
    }

    /// Mount a built-in screen over in-memory records.
    ///
    /// # Errors
    /// * `Err(AppError)` - If the screen is unknown
    pub fn with_records(records: Vec<DynamicRecord>, screen: &str) -> Result<Self, AppError> {
        let screen = presets::preset(screen)?;
        Ok(Self {
            records: records.into(),
            state: ListViewState::new(Arc::new(screen)),
            engine: ListViewEngine::new(),
            now: Instant::now(),
        })
    }

    /// Current list state.
    pub fn state(&self) -> &ListViewState {
        &self.state
    }

    /// Engine memo counters.
    pub fn stats(&self) -> MemoStats {
        self.engine.stats()
    }

    /// Shared record set.
    pub fn records(&self) -> &RecordSet<DynamicRecord> {
        &self.records
    }

    /// Replace the record set (a refetch).
    pub fn replace_records(&mut self, records: Vec<DynamicRecord>) {
        self.records = records.into();
    }

    /// Type `text` one character at a time, appending to the current query.
    /// Returns true if the settled query changed while typing.
    pub fn type_text(&mut self, text: &str) -> bool {
        let mut settled = false;
        let mut raw = self.state.query().raw().to_string();
        for ch in text.chars() {
            raw.push(ch);
            self.now += KEYSTROKE_INTERVAL;
            settled |= self.state.tick(self.now);
            self.state.set_query(raw.as_str(), self.now);
        }
        settled
    }

    /// Clear the search box.
    pub fn clear_query(&mut self) {
        self.now += KEYSTROKE_INTERVAL;
        self.state.set_query("", self.now);
    }

    /// Let simulated time pass. Returns true if the query settled.
    pub fn wait(&mut self, duration: Duration) -> bool {
        self.now += duration;
        self.state.tick(self.now)
    }

    /// Wait out the debounce interval.
    pub fn settle(&mut self) -> bool {
        let delay = self.state.query().delay();
        self.wait(delay)
    }

    /// Type and wait for the query to settle.
    pub fn search(&mut self, text: &str) {
        self.type_text(text);
        self.settle();
    }

    /// Pick a filter value.
    pub fn select_filter(&mut self, name: &str, value: &str) -> Result<bool, StateError> {
        self.state.set_filter(name, value)
    }

    /// Pick a sort key.
    pub fn sort_by(&mut self, key: &str) -> Result<bool, StateError> {
        self.state.set_sort(key)
    }

    /// Pick a page size.
    pub fn set_page_size(&mut self, size: usize) -> Result<(), StateError> {
        self.state.set_page_size(size)
    }

    /// Current view.
    pub fn view(&mut self) -> Arc<View<DynamicRecord>> {
        self.engine.compute_view(&self.records, &self.state)
    }

    /// Click a page number.
    pub fn go_to_page(&mut self, page: usize) -> bool {
        let page_count = self.view().page_count;
        self.state.go_to_page(page, page_count)
    }

    /// Click "next".
    pub fn next_page(&mut self) -> bool {
        let page_count = self.view().page_count;
        self.state.next_page(page_count)
    }

    /// Click "previous".
    pub fn previous_page(&mut self) -> bool {
        let page_count = self.view().page_count;
        self.state.previous_page(page_count)
    }

    /// Click "last".
    pub fn last_page(&mut self) -> bool {
        let page_count = self.view().page_count;
        self.state.last_page(page_count)
    }

    /// Values of `field` on the current page, as text.
    pub fn column(&mut self, field: &str) -> Vec<String> {
        self.view()
            .items
            .iter()
            .map(|r| {
                r.field(field)
                    .map(|v| v.to_text().into_owned())
                    .unwrap_or_default()
            })
            .collect()
    }

    /// Names on the current page.
    pub fn names(&mut self) -> Vec<String> {
        self.column("name")
    }

    /// Unmount the screen.
    pub fn unmount(&mut self) {
        self.state.dispose();
    }
}
