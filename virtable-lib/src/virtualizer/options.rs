//! Virtualizer configuration.

/// Per-table virtualizer configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualizerOptions {
    /// Height assumed for rows that have not been measured yet.
    pub estimate_size: u32,

    /// Rows rendered beyond each edge of the viewport.
    pub overscan: usize,

    /// Whether measurements from the renderer are used.
    /// When false every row keeps the estimated height.
    pub measure: bool,
}

impl Default for VirtualizerOptions {
    fn default() -> Self {
        Self {
            estimate_size: 10,
            overscan: 5,
            measure: true,
        }
    }
}

impl VirtualizerOptions {
    /// Create options with the default estimate and overscan.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the estimated row height.
    pub fn estimate_size(mut self, size: u32) -> Self {
        self.estimate_size = size;
        self
    }

    /// Set the overscan row count.
    pub fn overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    /// Ignore renderer measurements and keep estimated heights.
    pub fn without_measurement(mut self) -> Self {
        self.measure = false;
        self
    }
}
