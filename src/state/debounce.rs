//! Search debouncing (pure, clock injected).
//!
//! `SearchDebouncer` turns a rapidly changing raw query into a settled query.
//! Every raw change arms a fresh timer and cancels the previous one; only a
//! timer that fires uncancelled copies `raw` into `debounced`.
//!
//! There are no threads here. The host event loop supplies `Instant`s: it
//! either calls [`SearchDebouncer::poll`] on every tick (using
//! [`SearchDebouncer::next_deadline`] as its poll timeout), or schedules its own
//! timer and delivers it back through [`SearchDebouncer::fire`] with the
//! [`TimerHandle`] it was given. Stale handles are ignored.

use std::time::{Duration, Instant};
use tracing::{debug, trace};

/// Settle interval used when a screen does not configure one.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Identifies one armed timer. A newer arm invalidates older handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingTimer {
    handle: TimerHandle,
    deadline: Instant,
}

/// Raw/debounced query pair with a single cancellable timer.
#[derive(Debug, Clone)]
pub struct SearchDebouncer {
    raw: String,
    debounced: String,
    delay: Duration,
    pending: Option<PendingTimer>,
    next_handle: u64,
    disposed: bool,
}

impl SearchDebouncer {
    /// Create a debouncer with an empty query.
    pub fn new(delay: Duration) -> Self {
        Self {
            raw: String::new(),
            debounced: String::new(),
            delay,
            pending: None,
            next_handle: 0,
            disposed: false,
        }
    }

    /// The query as typed, updated on every keystroke.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The settled query the view is computed from.
    pub fn debounced(&self) -> &str {
        &self.debounced
    }

    /// Configured settle interval.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Handle of the armed timer, if any.
    pub fn pending(&self) -> Option<TimerHandle> {
        self.pending.map(|p| p.handle)
    }

    /// When the armed timer fires, if any.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.map(|p| p.deadline)
    }

    /// True when no timer is armed.
    pub fn is_settled(&self) -> bool {
        self.pending.is_none()
    }

    /// True after [`SearchDebouncer::dispose`].
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Record a raw query change at `now` and (re)arm the timer.
    ///
    /// Cancels any armed timer first. Returns the new timer's handle, or `None`
    /// once disposed (the change is then ignored entirely).
    pub fn set_raw(&mut self, raw: impl Into<String>, now: Instant) -> Option<TimerHandle> {
        if self.disposed {
            return None;
        }
        if let Some(prev) = self.pending.take() {
            trace!(handle = prev.handle.0, "debounce timer cancelled by new input");
        }

        self.raw = raw.into();
        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;
        self.pending = Some(PendingTimer {
            handle,
            deadline: now + self.delay,
        });
        trace!(handle = handle.0, raw = %self.raw, "debounce timer armed");
        Some(handle)
    }

    /// Fire the armed timer if its deadline has passed.
    ///
    /// Returns true if `debounced` changed as a result.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.pending {
            Some(p) if now >= p.deadline => self.settle(),
            _ => false,
        }
    }

    /// Deliver a timer callback for `handle`.
    ///
    /// Ignored unless `handle` is the currently armed timer. Returns true if
    /// `debounced` changed as a result.
    pub fn fire(&mut self, handle: TimerHandle) -> bool {
        match self.pending {
            Some(p) if p.handle == handle => self.settle(),
            _ => {
                trace!(handle = handle.0, "stale debounce timer ignored");
                false
            }
        }
    }

    /// Settle immediately without waiting (e.g. the user pressed Enter).
    ///
    /// Returns true if `debounced` changed.
    pub fn flush(&mut self) -> bool {
        if self.pending.is_some() {
            self.settle()
        } else {
            false
        }
    }

    /// Cancel the armed timer without settling. Returns true if one was armed.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    /// Tear down: cancel the armed timer and ignore all further input.
    pub fn dispose(&mut self) {
        if self.cancel() {
            debug!("pending debounce timer cancelled on dispose");
        }
        self.disposed = true;
    }

    fn settle(&mut self) -> bool {
        self.pending = None;
        if self.debounced == self.raw {
            return false;
        }
        self.debounced.clone_from(&self.raw);
        debug!(query = %self.debounced, "search query settled");
        true
    }
}

impl Default for SearchDebouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "debounce_tests.rs"]
mod tests;
