//! Tests for ListViewState transitions.

use super::*;
use crate::config::presets;
use std::time::Duration;

// ===== Test Helpers =====

fn businesses() -> ListViewState {
    let screen = presets::preset("businesses").expect("valid preset");
    ListViewState::new(Arc::new(screen))
}

/// State sitting on page 3 of 5.
fn on_page_three() -> ListViewState {
    let mut state = businesses();
    assert!(state.go_to_page(3, 5));
    state
}

// ===== Mount =====

#[test]
fn new_state_uses_screen_defaults() {
    let state = businesses();
    assert_eq!(state.query().raw(), "");
    assert!(state.filters().is_identity());
    assert_eq!(state.sort().map(|k| k.as_str()), Some("name"));
    assert_eq!(state.page().page_number(), 1);
    assert_eq!(state.page().page_size().get(), 10);
    assert_eq!(state.query().delay(), Duration::from_millis(300));
}

// ===== Page reset =====

#[test]
fn filter_change_on_page_three_resets_to_page_one() {
    let mut state = on_page_three();
    assert_eq!(state.set_filter("status", "active"), Ok(true));
    assert_eq!(state.page().page_number(), 1);
}

#[test]
fn sort_change_on_page_three_resets_to_page_one() {
    let mut state = on_page_three();
    assert_eq!(state.set_sort("recent"), Ok(true));
    assert_eq!(state.page().page_number(), 1);
}

#[test]
fn query_change_on_page_three_resets_to_page_one() {
    let mut state = on_page_three();
    state.set_query("acme", Instant::now());
    assert_eq!(state.page().page_number(), 1);
}

#[test]
fn paging_while_query_is_pending_returns_to_first_page_on_settle() {
    // GIVEN: a query typed but not yet settled
    let mut state = businesses();
    let t0 = Instant::now();
    state.set_query("user 00", t0);

    // WHEN: the user pages through the old results, then the query settles
    assert!(state.go_to_page(3, 5));
    assert!(state.tick(t0 + Duration::from_millis(300)));

    // THEN: the new result set opens on page 1
    assert_eq!(state.page().page_number(), 1);
}

#[test]
fn timer_callback_settle_returns_to_first_page() {
    let mut state = businesses();
    let handle = state.set_query("acme", Instant::now()).expect("armed");
    assert!(state.go_to_page(2, 5));

    assert!(state.fire_search_timer(handle));
    assert_eq!(state.page().page_number(), 1);
}

#[test]
fn submitted_query_returns_to_first_page() {
    let mut state = businesses();
    state.set_query("acme", Instant::now());
    assert!(state.go_to_page(4, 5));

    assert!(state.submit_query());
    assert_eq!(state.page().page_number(), 1);
}

#[test]
fn tick_without_settling_keeps_page() {
    let mut state = on_page_three();
    assert!(!state.tick(Instant::now()));
    assert_eq!(state.page().page_number(), 3);
}

#[test]
fn unchanged_sort_keeps_page() {
    let mut state = on_page_three();
    assert_eq!(state.set_sort("name"), Ok(false));
    assert_eq!(state.page().page_number(), 3);
}

#[test]
fn reselecting_same_filter_value_keeps_page() {
    let mut state = businesses();
    state.set_filter("status", "active").expect("valid filter");
    state.go_to_page(2, 5);
    assert_eq!(state.set_filter("status", "active"), Ok(false));
    assert_eq!(state.page().page_number(), 2);
}

#[test]
fn clear_filters_resets_page_only_when_something_was_set() {
    let mut state = on_page_three();
    assert!(!state.clear_filters());
    assert_eq!(state.page().page_number(), 3);

    state.set_filter("plan", "premium").expect("valid filter");
    state.go_to_page(2, 5);
    assert!(state.clear_filters());
    assert_eq!(state.page().page_number(), 1);
}

// ===== Filter validation =====

#[test]
fn unknown_filter_is_rejected_and_state_unchanged() {
    let mut state = on_page_three();
    assert_eq!(
        state.set_filter("colour", "red"),
        Err(StateError::UnknownFilter {
            name: "colour".to_string()
        })
    );
    assert!(state.filters().is_identity());
    assert_eq!(state.page().page_number(), 3);
}

#[test]
fn disallowed_value_is_rejected() {
    let mut state = businesses();
    let result = state.set_filter("status", "pending");
    assert_eq!(
        result,
        Err(StateError::DisallowedValue {
            filter: "status".to_string(),
            value: "pending".to_string(),
            allowed: "active, inactive".to_string(),
        })
    );
}

#[test]
fn all_is_always_allowed() {
    let mut state = businesses();
    state.set_filter("status", "inactive").expect("valid");
    assert_eq!(state.set_filter("status", "ALL"), Ok(true));
    assert!(state.filters().is_identity());
}

// ===== Sort validation =====

#[test]
fn unknown_sort_key_is_rejected() {
    let mut state = businesses();
    assert_eq!(
        state.set_sort("popularity"),
        Err(StateError::UnknownSortKey {
            key: "popularity".to_string()
        })
    );
    assert_eq!(state.sort().map(|k| k.as_str()), Some("name"));
}

// ===== Query =====

#[test]
fn query_settles_after_debounce_interval() {
    let mut state = businesses();
    let t0 = Instant::now();
    state.set_query("a", t0);
    state.set_query("ac", t0 + Duration::from_millis(100));

    assert!(!state.tick(t0 + Duration::from_millis(350)));
    assert!(state.tick(t0 + Duration::from_millis(400)));
    assert_eq!(state.query().debounced(), "ac");
}

#[test]
fn stale_timer_handle_is_ignored() {
    let mut state = businesses();
    let t0 = Instant::now();
    let first = state.set_query("a", t0).expect("armed");
    let second = state.set_query("ab", t0).expect("armed");

    assert!(!state.fire_search_timer(first));
    assert_eq!(state.query().debounced(), "");
    assert!(state.fire_search_timer(second));
    assert_eq!(state.query().debounced(), "ab");
}

#[test]
fn submit_query_settles_immediately() {
    let mut state = businesses();
    state.set_query("acme", Instant::now());
    assert!(state.submit_query());
    assert_eq!(state.query().debounced(), "acme");
}

#[test]
fn dispose_ignores_later_input() {
    let mut state = businesses();
    let t0 = Instant::now();
    state.set_query("a", t0);
    state.dispose();

    assert!(state.set_query("ab", t0).is_none());
    assert!(!state.tick(t0 + Duration::from_secs(1)));
    assert_eq!(state.query().debounced(), "");
}

// ===== Paging =====

#[test]
fn set_page_size_rejects_zero() {
    let mut state = businesses();
    assert_eq!(state.set_page_size(0), Err(StateError::InvalidPageSize));
    assert_eq!(state.page().page_size().get(), 10);
}

#[test]
fn set_page_size_returns_to_first_page() {
    let mut state = on_page_three();
    state.set_page_size(25).expect("positive size");
    assert_eq!(state.page().page_number(), 1);
    assert_eq!(state.page().page_size().get(), 25);
}

#[test]
fn navigation_outside_range_is_noop() {
    let mut state = businesses();
    assert!(!state.previous_page(3));
    assert!(!state.go_to_page(4, 3));
    assert!(state.last_page(3));
    assert!(!state.next_page(3));
    assert_eq!(state.page().page_number(), 3);
    assert!(state.first_page(3));
    assert_eq!(state.page().page_number(), 1);
}
