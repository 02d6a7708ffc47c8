//! Serializable view of the committed filter and sort state.

use serde::Serialize;

use crate::query::{Direction, FilterState, FilterValue, SortState};

/// One committed column filter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnFilter {
    pub id: String,
    pub value: FilterValue,
}

/// The committed sort.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSort {
    pub id: String,
    pub desc: bool,
}

/// Diagnostic snapshot of a table's state.
///
/// Serializes as
/// `{"columnFilters": [{"id": .., "value": ..}], "sorting": [{"id": .., "desc": ..}]}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub column_filters: Vec<ColumnFilter>,
    pub sorting: Vec<ColumnSort>,
}

impl Snapshot {
    pub fn new(filters: &FilterState, sort: Option<&SortState>) -> Self {
        Self {
            column_filters: filters
                .iter()
                .map(|(id, value)| ColumnFilter {
                    id: id.to_string(),
                    value: value.clone(),
                })
                .collect(),
            sorting: sort
                .map(|s| ColumnSort {
                    id: s.column.clone(),
                    desc: s.direction == Direction::Desc,
                })
                .into_iter()
                .collect(),
        }
    }
}
