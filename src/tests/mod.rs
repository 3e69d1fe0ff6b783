//! Internal test modules - whitebox tests with crate access
//!
//! Acceptance scenarios drive [`crate::test_harness::ListViewHarness`] the way
//! a user drives a list screen.

pub(crate) const BUSINESSES_FIXTURE: &str = "tests/fixtures/businesses.json";
