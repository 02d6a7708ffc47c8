//! Table view configuration.

use std::time::Duration;

use crate::debounce::DEFAULT_DEBOUNCE;
use crate::virtualizer::VirtualizerOptions;

/// Configuration for a [`TableView`](super::TableView).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewConfig {
    /// Quiet period before text and range edits are committed.
    pub debounce: Duration,

    /// Row height estimate, overscan and measurement.
    pub virtualizer: VirtualizerOptions,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            virtualizer: VirtualizerOptions::default(),
        }
    }
}

impl ViewConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the debounce delay.
    pub fn debounce(mut self, delay: Duration) -> Self {
        self.debounce = delay;
        self
    }

    /// Set the virtualizer options.
    pub fn virtualizer(mut self, options: VirtualizerOptions) -> Self {
        self.virtualizer = options;
        self
    }
}
