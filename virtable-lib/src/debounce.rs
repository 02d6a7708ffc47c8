//! Debounced filter input.
//!
//! A [`Debounced`] value buffers raw edits and releases the last one once the
//! input has been quiet for the configured delay. It owns no timer: callers
//! pass the current [`Instant`] in and ask for [`Debounced::deadline`] to
//! know when to poll next.

use std::time::{Duration, Instant};

use log::trace;

/// Quiet period before a raw edit is committed.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Debouncer state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DebounceState<V> {
    /// Nothing waiting.
    Idle,
    /// A candidate waiting for its deadline.
    Pending { value: V, deadline: Instant },
}

/// A debounced input for one filter field.
#[derive(Debug, Clone)]
pub struct Debounced<V> {
    delay: Duration,
    /// What the control currently shows: the last edit or external value.
    current: V,
    state: DebounceState<V>,
    torn_down: bool,
}

impl<V: Clone + PartialEq> Debounced<V> {
    /// Create an idle debouncer showing `initial`.
    pub fn new(initial: V, delay: Duration) -> Self {
        Self {
            delay,
            current: initial,
            state: DebounceState::Idle,
            torn_down: false,
        }
    }

    /// Record a raw edit, restarting the quiet period.
    pub fn input(&mut self, value: V, now: Instant) {
        if self.torn_down {
            return;
        }
        self.current = value.clone();
        self.state = DebounceState::Pending {
            value,
            deadline: now + self.delay,
        };
    }

    /// Emit the pending value if its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<V> {
        match &self.state {
            DebounceState::Pending { deadline, .. } if now >= *deadline => {
                match std::mem::replace(&mut self.state, DebounceState::Idle) {
                    DebounceState::Pending { value, .. } => Some(value),
                    DebounceState::Idle => None,
                }
            }
            _ => None,
        }
    }

    /// Adopt a value set from outside, dropping any pending edit.
    pub fn sync(&mut self, value: V) {
        if self.torn_down {
            return;
        }
        if self.is_pending() {
            trace!("External value replaced a pending edit");
        }
        self.current = value;
        self.state = DebounceState::Idle;
    }

    /// Stop for good. Nothing is emitted after teardown.
    pub fn teardown(&mut self) {
        self.state = DebounceState::Idle;
        self.torn_down = true;
    }

    /// When the pending value becomes due.
    pub fn deadline(&self) -> Option<Instant> {
        match &self.state {
            DebounceState::Pending { deadline, .. } => Some(*deadline),
            DebounceState::Idle => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, DebounceState::Pending { .. })
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// The value the control shows.
    pub fn value(&self) -> &V {
        &self.current
    }

    pub fn state(&self) -> &DebounceState<V> {
        &self.state
    }
}
