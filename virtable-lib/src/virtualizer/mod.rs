//! Viewport virtualization.
//!
//! The virtualizer decides which rows of a (possibly huge) sequence need to
//! be materialized for the current scroll position. It keeps a prefix sum
//! over row heights so "where does row i start" and "which row is at offset
//! y" never rescan the sequence.
//!
//! Heights are cached by row key, not by position. When the row sequence is
//! replaced (a re-filter, a re-sort) a row keeps its measured height wherever
//! it moves, and a row that newly lands on a position never inherits the
//! previous occupant's height.

mod heights;
mod options;
mod scroll;
mod types;

use std::hash::Hash;

use log::trace;

use heights::Heights;

pub use options::VirtualizerOptions;
pub use scroll::{ScrollRequest, ScrollState};
pub use types::{ViewportMetrics, VirtualItem, Window};

/// Windowing over a keyed row sequence.
///
/// # Example
///
/// ```
/// use virtable_lib::virtualizer::{Virtualizer, VirtualizerOptions};
///
/// let mut v = Virtualizer::new(VirtualizerOptions::new().estimate_size(10).overscan(5));
/// v.set_keys((0..1000u32).collect());
///
/// let window = v.compute_window(500, 100);
/// assert_eq!(window.visible, 50..60);
/// assert_eq!(window.range, 45..65);
/// assert_eq!(window.total_extent, 10_000);
/// ```
#[derive(Debug, Clone)]
pub struct Virtualizer<K> {
    options: VirtualizerOptions,
    heights: Heights<K>,
}

impl<K: Clone + Eq + Hash> Virtualizer<K> {
    pub fn new(options: VirtualizerOptions) -> Self {
        Self {
            heights: Heights::new(options.estimate_size),
            options,
        }
    }

    pub fn options(&self) -> &VirtualizerOptions {
        &self.options
    }

    /// Replace the row sequence.
    ///
    /// Measured heights stay attached to their keys.
    pub fn set_keys(&mut self, keys: Vec<K>) {
        self.heights.set_keys(keys);
    }

    /// Number of rows in the sequence.
    pub fn len(&self) -> usize {
        self.heights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heights.len() == 0
    }

    /// Key of the row at `index`.
    pub fn key(&self, index: usize) -> Option<&K> {
        self.heights.key(index)
    }

    /// Record the rendered height of a row.
    ///
    /// The measurement is dropped if `key` is no longer the row at `index`
    /// (the sequence changed after the row was rendered) or if measurement is
    /// disabled. Returns whether the layout changed.
    pub fn measure(&mut self, index: usize, key: &K, size: u32) -> bool {
        if !self.options.measure {
            return false;
        }
        if self.heights.key(index) != Some(key) {
            trace!("Dropping stale measurement for index {index}");
            return false;
        }
        let changed = self.heights.set(index, size);
        if changed {
            trace!("Row {index} measured at {size}");
        }
        changed
    }

    /// Forget every measurement.
    pub fn clear_measurements(&mut self) {
        self.heights.clear_measurements();
    }

    /// Number of cached measurements.
    pub fn measured_count(&self) -> usize {
        self.heights.measured_len()
    }

    /// Height of the row at `index`, measured or estimated.
    pub fn item_size(&self, index: usize) -> u32 {
        self.heights.size(index)
    }

    /// Offset where row `index` starts. Indices past the end give the total.
    pub fn offset_of(&mut self, index: usize) -> u64 {
        self.heights.refresh();
        self.heights.start(index)
    }

    /// Row at offset `y`, or `None` past the end of the content.
    pub fn index_at(&mut self, y: u64) -> Option<usize> {
        self.heights.refresh();
        (y < self.heights.total()).then(|| self.heights.index_at(y))
    }

    /// Height of the whole sequence.
    pub fn total_extent(&mut self) -> u64 {
        self.heights.refresh();
        self.heights.total()
    }

    /// Compute the rows to render.
    ///
    /// `visible` holds every row whose extent intersects
    /// `[scroll_offset, scroll_offset + viewport_height)`; `range` widens it
    /// by the overscan on both sides. A zero-height viewport renders nothing.
    pub fn compute_window(&mut self, scroll_offset: u64, viewport_height: u64) -> Window<K> {
        self.heights.refresh();
        let count = self.heights.len();
        let total = self.heights.total();
        if count == 0 || viewport_height == 0 {
            return Window::empty(total);
        }

        let visible = if scroll_offset >= total {
            count..count
        } else {
            let first = self.heights.index_at(scroll_offset);
            let end = self
                .heights
                .count_starting_before(scroll_offset.saturating_add(viewport_height));
            first..end.max(first + 1)
        };

        let overscan = self.options.overscan;
        let range =
            visible.start.saturating_sub(overscan)..visible.end.saturating_add(overscan).min(count);
        let items = range
            .clone()
            .filter_map(|index| {
                let key = self.heights.key(index)?.clone();
                Some(VirtualItem {
                    index,
                    key,
                    start: self.heights.start(index),
                    size: self.heights.size(index),
                })
            })
            .collect();

        Window {
            visible,
            range,
            items,
            total_extent: total,
        }
    }
}
