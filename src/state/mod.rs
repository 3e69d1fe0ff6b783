//! List screen state machine (pure).
//!
//! All state transitions are pure functions testable without a UI; time is
//! passed in as `Instant`s.

pub mod debounce;
pub mod filter_state;
pub mod list_state;
pub mod page;

// Re-export for convenience
pub use debounce::{SearchDebouncer, TimerHandle, DEFAULT_DEBOUNCE};
pub use filter_state::{FilterSelection, FilterState, ALL};
pub use list_state::ListViewState;
pub use page::{PageSize, PageState};
