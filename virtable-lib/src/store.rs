//! Immutable row storage.

use std::sync::Arc;

use crate::model::TableRow;

/// The immutable source dataset.
///
/// Rows are supplied once and never mutated. Cloning a store is cheap and
/// shares the underlying rows.
#[derive(Debug)]
pub struct RowStore<T: TableRow> {
    rows: Arc<[T]>,
}

impl<T: TableRow> RowStore<T> {
    /// Create a store from rows, in the order they should appear unsorted.
    pub fn new(rows: Vec<T>) -> Self {
        Self { rows: rows.into() }
    }

    /// Get the number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get a row by index.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.rows.get(index)
    }

    /// All rows in store order.
    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    /// Iterate over rows in store order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.rows.iter()
    }
}

impl<T: TableRow> Clone for RowStore<T> {
    fn clone(&self) -> Self {
        Self {
            rows: Arc::clone(&self.rows),
        }
    }
}

impl<T: TableRow> Default for RowStore<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<T: TableRow> FromIterator<T> for RowStore<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
