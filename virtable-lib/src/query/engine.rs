//! The filter/sort engine.
//!
//! [`derive`] turns a row store, a filter state and an optional sort into the
//! ordered list of store indices that should be displayed. It is a pure
//! function of its inputs, so it can be re-run on every state replacement.

use crate::column::{Column, FilterKind, find_column};
use crate::model::{TableRow, Value};
use crate::store::RowStore;

use super::{FilterState, FilterValue, SortState};

/// A filter compiled against its column, ready to test rows.
#[derive(Debug, Clone, PartialEq)]
enum Predicate {
    /// Lowercased needle for a case-insensitive substring match.
    Contains(String),
    /// Inclusive numeric bounds; at least one is set.
    Between { min: Option<f64>, max: Option<f64> },
    /// Exact string match.
    Equals(String),
}

impl Predicate {
    /// Compile a filter value. Returns `None` when the value cannot reject
    /// any row (empty text, no usable bound, "all" selection).
    fn compile(value: &FilterValue) -> Option<Self> {
        match value {
            FilterValue::Text(needle) if !needle.is_empty() => {
                Some(Predicate::Contains(needle.to_lowercase()))
            }
            FilterValue::Range(min, max) => {
                let min = parse_bound(min.as_deref());
                let max = parse_bound(max.as_deref());
                (min.is_some() || max.is_some()).then_some(Predicate::Between { min, max })
            }
            FilterValue::Select(option) if !option.is_empty() => {
                Some(Predicate::Equals(option.clone()))
            }
            _ => None,
        }
    }

    fn matches(&self, value: &Value) -> bool {
        match self {
            Predicate::Contains(needle) => value.to_string().to_lowercase().contains(needle),
            Predicate::Between { min, max } => match value.as_f64() {
                Some(v) => min.is_none_or(|m| v >= m) && max.is_none_or(|m| v <= m),
                None => false,
            },
            Predicate::Equals(option) => value.to_string() == *option,
        }
    }
}

/// Parse a range bound. Blank, non-numeric and non-finite input is absent.
pub fn parse_bound(bound: Option<&str>) -> Option<f64> {
    bound
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

/// Derive the visible row sequence.
///
/// A row is kept when it satisfies every filter in `filters`. Filters on
/// unknown columns, or columns with [`FilterKind::None`], are ignored. When
/// `sort` names a sortable column the kept rows are stably sorted by that
/// column's value, so ties keep their store order in either direction.
///
/// # Example
///
/// ```
/// use virtable_lib::query::{derive, FilterState, FilterValue, SortState};
/// use virtable_lib::model::Person;
/// use virtable_lib::RowStore;
///
/// let store: RowStore<Person> = RowStore::default();
/// let filters = FilterState::new().with("age", FilterValue::range(Some("30"), Some("60")));
/// let rows = derive(&store, &Person::columns(), &filters, Some(&SortState::desc("age")));
/// assert!(rows.is_empty());
/// ```
pub fn derive<T: TableRow>(
    store: &RowStore<T>,
    columns: &[Column<T>],
    filters: &FilterState,
    sort: Option<&SortState>,
) -> Vec<usize> {
    let predicates: Vec<(&Column<T>, Predicate)> = filters
        .iter()
        .filter_map(|(key, value)| {
            let column = find_column(columns, key)?;
            if column.filter_kind() == FilterKind::None {
                return None;
            }
            Some((column, Predicate::compile(value)?))
        })
        .collect();

    let mut indices: Vec<usize> = store
        .iter()
        .enumerate()
        .filter(|(_, row)| {
            predicates
                .iter()
                .all(|(column, predicate)| predicate.matches(&column.read(row)))
        })
        .map(|(index, _)| index)
        .collect();

    if let Some(sort) = sort
        && let Some(column) = find_column(columns, &sort.column)
        && column.is_sortable()
    {
        let rows = store.rows();
        let mut keyed: Vec<(Value, usize)> = indices
            .iter()
            .map(|&index| (column.read(&rows[index]), index))
            .collect();
        // `sort_by` is stable and `keyed` starts in store order.
        keyed.sort_by(|a, b| sort.direction.apply(a.0.total_cmp(&b.0)));
        indices = keyed.into_iter().map(|(_, index)| index).collect();
    }

    indices
}

/// Column-aware wrapper around [`derive`].
#[derive(Debug, Clone)]
pub struct Engine<T: TableRow> {
    columns: Vec<Column<T>>,
}

impl<T: TableRow> Engine<T> {
    pub fn new(columns: Vec<Column<T>>) -> Self {
        Self { columns }
    }

    pub fn columns(&self) -> &[Column<T>] {
        &self.columns
    }

    pub fn column(&self, key: &str) -> Option<&Column<T>> {
        find_column(&self.columns, key)
    }

    pub fn derive(
        &self,
        store: &RowStore<T>,
        filters: &FilterState,
        sort: Option<&SortState>,
    ) -> Vec<usize> {
        derive(store, &self.columns, filters, sort)
    }
}
