//! Column descriptors.

use std::fmt;
use std::str::FromStr;

use crate::model::{TableRow, Value};
use crate::query::Direction;

// =============================================================================
// FilterKind
// =============================================================================

/// The filter control a column offers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FilterKind {
    /// Column cannot be filtered.
    None,
    /// Case-insensitive substring search.
    #[default]
    Text,
    /// Numeric min/max bounds.
    Range,
    /// Exact match against one of the column's options.
    Select,
}

impl FilterKind {
    /// Parse a filter kind tag.
    ///
    /// Unknown tags fall back to [`FilterKind::Text`].
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "none" => FilterKind::None,
            "range" => FilterKind::Range,
            "select" => FilterKind::Select,
            _ => FilterKind::Text,
        }
    }

    /// Whether this kind accepts a filter at all.
    pub fn is_filterable(&self) -> bool {
        *self != FilterKind::None
    }

    /// Whether raw input for this kind goes through a debouncer.
    ///
    /// Select controls commit on change.
    pub fn is_debounced(&self) -> bool {
        matches!(self, FilterKind::Text | FilterKind::Range)
    }
}

impl FromStr for FilterKind {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(FilterKind::from_tag(s))
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            FilterKind::None => "none",
            FilterKind::Text => "text",
            FilterKind::Range => "range",
            FilterKind::Select => "select",
        };
        f.write_str(tag)
    }
}

// =============================================================================
// Column
// =============================================================================

/// A table column definition.
///
/// Columns are static configuration: built once at startup and never
/// mutated afterwards.
pub struct Column<T: TableRow> {
    key: String,
    header: String,
    filter: FilterKind,
    sortable: bool,
    desc_first: bool,
    options: Vec<String>,
    accessor: Option<fn(&T) -> Value>,
}

impl<T: TableRow> Column<T> {
    /// Create a new text-filtered, sortable column.
    pub fn new(key: impl Into<String>, header: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            header: header.into(),
            filter: FilterKind::default(),
            sortable: true,
            desc_first: false,
            options: Vec::new(),
            accessor: None,
        }
    }

    /// Set the filter kind.
    pub fn filter(mut self, kind: FilterKind) -> Self {
        self.filter = kind;
        self
    }

    /// Set the filter kind from a tag such as `"range"`.
    pub fn filter_tag(self, tag: &str) -> Self {
        self.filter(FilterKind::from_tag(tag))
    }

    /// Set whether the column can be sorted.
    pub fn sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    /// Start the sort cycle descending instead of ascending.
    ///
    /// Numbers and dates usually read best largest first.
    pub fn sort_desc_first(mut self, desc_first: bool) -> Self {
        self.desc_first = desc_first;
        self
    }

    /// Set the options offered by a select filter.
    pub fn options<S: Into<String>>(mut self, options: impl IntoIterator<Item = S>) -> Self {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    /// Read values through a custom function instead of [`TableRow::value`].
    pub fn accessor(mut self, accessor: fn(&T) -> Value) -> Self {
        self.accessor = Some(accessor);
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    pub fn filter_kind(&self) -> FilterKind {
        self.filter
    }

    pub fn is_sortable(&self) -> bool {
        self.sortable
    }

    /// Direction the first header click sorts in.
    pub fn first_direction(&self) -> Direction {
        if self.desc_first {
            Direction::Desc
        } else {
            Direction::Asc
        }
    }

    /// Select options. Empty for non-select columns.
    pub fn select_options(&self) -> &[String] {
        &self.options
    }

    /// Read this column's value from a row.
    pub fn read(&self, row: &T) -> Value {
        match self.accessor {
            Some(accessor) => accessor(row),
            None => row.value(&self.key),
        }
    }
}

impl<T: TableRow> Clone for Column<T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            header: self.header.clone(),
            filter: self.filter,
            sortable: self.sortable,
            desc_first: self.desc_first,
            options: self.options.clone(),
            accessor: self.accessor,
        }
    }
}

impl<T: TableRow> fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("header", &self.header)
            .field("filter", &self.filter)
            .field("sortable", &self.sortable)
            .field("desc_first", &self.desc_first)
            .field("options", &self.options)
            .field("accessor", &self.accessor.is_some())
            .finish()
    }
}

/// Find a column by key.
pub fn find_column<'a, T: TableRow>(columns: &'a [Column<T>], key: &str) -> Option<&'a Column<T>> {
    columns.iter().find(|c| c.key == key)
}
