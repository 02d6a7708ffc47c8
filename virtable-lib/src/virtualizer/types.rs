//! Window output and viewport input types.

use std::ops::Range;

/// One row to materialize.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualItem<K> {
    /// Position in the row sequence.
    pub index: usize,
    /// Stable identity of the row; pass it back with measurements.
    pub key: K,
    /// Offset of the row's top edge.
    pub start: u64,
    /// Row height used for layout.
    pub size: u32,
}

impl<K> VirtualItem<K> {
    /// Offset just past the row's bottom edge.
    pub fn end(&self) -> u64 {
        self.start + u64::from(self.size)
    }
}

/// The rows to render for one scroll position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Window<K> {
    /// Rows intersecting the viewport.
    pub visible: Range<usize>,
    /// `visible` widened by overscan; these are the rows in `items`.
    pub range: Range<usize>,
    pub items: Vec<VirtualItem<K>>,
    /// Height of the whole scrollable content.
    pub total_extent: u64,
}

impl<K> Window<K> {
    pub(super) fn empty(total_extent: u64) -> Self {
        Self {
            visible: 0..0,
            range: 0..0,
            items: Vec::new(),
            total_extent,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sequence indices of the rendered rows.
    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.items.iter().map(|item| item.index)
    }
}

/// Scroll position and viewport size reported by the renderer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewportMetrics {
    pub scroll_offset: u64,
    pub viewport_height: u64,
}

impl ViewportMetrics {
    pub fn new(scroll_offset: u64, viewport_height: u64) -> Self {
        Self {
            scroll_offset,
            viewport_height,
        }
    }

    /// Build metrics from signed renderer values. Negatives become zero.
    pub fn from_signed(scroll_offset: i64, viewport_height: i64) -> Self {
        Self {
            scroll_offset: scroll_offset.max(0).unsigned_abs(),
            viewport_height: viewport_height.max(0).unsigned_abs(),
        }
    }
}
