//! Filter values and the immutable filter state.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;

/// A committed filter for one column.
///
/// Range bounds hold the raw text the user typed. Parsing happens when the
/// engine compiles predicates, so a malformed bound simply drops out.
///
/// # Example
///
/// ```
/// use virtable_lib::query::FilterValue;
///
/// let name = FilterValue::text("ann");
/// let age = FilterValue::range(Some("30"), None::<&str>);
/// let status = FilterValue::select("single");
///
/// assert!(FilterValue::text("").is_empty());
/// assert!(FilterValue::range(Some(" "), None::<&str>).is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FilterValue {
    /// Substring search.
    Text(String),
    /// Inclusive `(min, max)` bounds.
    Range(Option<String>, Option<String>),
    /// Exact option match.
    Select(String),
}

impl FilterValue {
    /// Creates a text filter.
    pub fn text(value: impl Into<String>) -> Self {
        FilterValue::Text(value.into())
    }

    /// Creates a range filter.
    pub fn range<S: Into<String>>(min: Option<S>, max: Option<S>) -> Self {
        FilterValue::Range(min.map(Into::into), max.map(Into::into))
    }

    /// Creates a select filter.
    pub fn select(value: impl Into<String>) -> Self {
        FilterValue::Select(value.into())
    }

    /// Whether this value filters nothing.
    pub fn is_empty(&self) -> bool {
        match self {
            FilterValue::Text(s) | FilterValue::Select(s) => s.is_empty(),
            FilterValue::Range(min, max) => is_blank(min) && is_blank(max),
        }
    }

    /// Lower bound of a range filter.
    pub fn min(&self) -> Option<&str> {
        match self {
            FilterValue::Range(min, _) => min.as_deref(),
            _ => None,
        }
    }

    /// Upper bound of a range filter.
    pub fn max(&self) -> Option<&str> {
        match self {
            FilterValue::Range(_, max) => max.as_deref(),
            _ => None,
        }
    }

    /// The string of a text or select filter.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FilterValue::Text(s) | FilterValue::Select(s) => Some(s),
            FilterValue::Range(..) => None,
        }
    }
}

fn is_blank(bound: &Option<String>) -> bool {
    bound.as_deref().is_none_or(|s| s.trim().is_empty())
}

/// The set of committed column filters.
///
/// A filter state is never mutated in place: every `with`/`without` returns
/// a new state. The map is shared, so clones are cheap and
/// [`FilterState::same_as`] can short-circuit on pointer equality.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    entries: Arc<BTreeMap<String, FilterValue>>,
}

impl FilterState {
    /// Create an empty filter state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a new state with `column` set to `value`.
    ///
    /// An empty value removes the column's filter.
    pub fn with(&self, column: impl Into<String>, value: FilterValue) -> Self {
        let column = column.into();
        if value.is_empty() {
            return self.without(&column);
        }
        let mut entries = (*self.entries).clone();
        entries.insert(column, value);
        Self {
            entries: Arc::new(entries),
        }
    }

    /// Returns a new state without a filter on `column`.
    pub fn without(&self, column: &str) -> Self {
        if !self.entries.contains_key(column) {
            return self.clone();
        }
        let mut entries = (*self.entries).clone();
        entries.remove(column);
        Self {
            entries: Arc::new(entries),
        }
    }

    /// Get the filter for a column.
    pub fn get(&self, column: &str) -> Option<&FilterValue> {
        self.entries.get(column)
    }

    /// Number of active filters.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no filter is active.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(column, value)` pairs in column key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FilterValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Whether two states filter identically.
    pub fn same_as(&self, other: &FilterState) -> bool {
        Arc::ptr_eq(&self.entries, &other.entries) || self.entries == other.entries
    }

    /// Whether every filter of `self` is also present, unchanged, in `other`.
    pub fn is_subset_of(&self, other: &FilterState) -> bool {
        self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}
