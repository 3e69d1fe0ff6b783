//! Pure core integration functions.
//!
//! Glue between the impure shell (file input, command line) and the pure core
//! (state transitions, view engine). Everything here is testable without I/O.

use crate::config::ScreenConfig;
use crate::model::{DynamicRecord, Record, RecordError, RecordSet, StateError};
use crate::state::ListViewState;
use crate::view_state::{ListViewEngine, View};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

/// Turn the elements of a JSON export into records.
///
/// # Returns
///
/// Tuple of (usable records in export order, errors for skipped elements)
pub fn process_records(items: Vec<serde_json::Value>) -> (Vec<DynamicRecord>, Vec<RecordError>) {
    let mut records = Vec::with_capacity(items.len());
    let mut errors = Vec::new();

    for (index, item) in items.into_iter().enumerate() {
        match DynamicRecord::from_json(index, item) {
            Ok(record) => records.push(record),
            Err(err) => {
                warn!(error = %err, "record skipped");
                errors.push(err);
            }
        }
    }

    (records, errors)
}

/// One-shot description of a list screen's state, as given on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListRequest {
    /// Search text, settled immediately.
    pub query: Option<String>,
    /// `(filter, value)` selections, applied in order.
    pub filters: Vec<(String, String)>,
    /// Sort key.
    pub sort: Option<String>,
    /// 1-based page; out-of-range pages leave the view on page 1.
    pub page: Option<usize>,
    /// Records per page.
    pub page_size: Option<usize>,
}

/// Parse a `name=value` filter argument.
///
/// # Errors
///
/// Returns a message if there is no `=` or the name is empty.
pub fn parse_filter_arg(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.trim().to_string()))
        }
        Some(_) => Err(format!("filter {:?} has an empty name", raw)),
        None => Err(format!("expected NAME=VALUE, got {:?}", raw)),
    }
}

/// Build the state a request describes.
///
/// The query is submitted rather than debounced; there is no one typing.
/// The page is not applied here since navigation needs the page count.
///
/// # Errors
///
/// Returns `StateError` for unknown filters, disallowed values, unknown sort
/// keys or a zero page size.
pub fn state_for_request(
    screen: Arc<ScreenConfig>,
    request: &ListRequest,
) -> Result<ListViewState, StateError> {
    let mut state = ListViewState::new(screen);

    if let Some(size) = request.page_size {
        state.set_page_size(size)?;
    }
    for (name, value) in &request.filters {
        state.set_filter(name, value)?;
    }
    if let Some(key) = &request.sort {
        state.set_sort(key)?;
    }
    if let Some(query) = &request.query {
        state.set_query(query.as_str(), Instant::now());
        state.submit_query();
    }
    Ok(state)
}

/// Compute the view a request describes.
///
/// # Errors
///
/// Same as [`state_for_request`].
pub fn run_request<R: Record + Clone>(
    records: &RecordSet<R>,
    screen: Arc<ScreenConfig>,
    request: &ListRequest,
) -> Result<Arc<View<R>>, StateError> {
    let mut state = state_for_request(screen, request)?;
    let mut engine = ListViewEngine::new();
    let view = engine.compute_view(records, &state);

    let Some(page) = request.page else {
        return Ok(view);
    };
    if !state.go_to_page(page, view.page_count) {
        debug!(
            page,
            page_count = view.page_count,
            "requested page unchanged or out of range"
        );
        return Ok(view);
    }
    Ok(engine.compute_view(records, &state))
}
