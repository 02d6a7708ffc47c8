//! Sort direction and single-column sort state.

use std::cmp::Ordering;

use serde::Serialize;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Ascending order (A-Z, 0-9).
    Asc,
    /// Descending order (Z-A, 9-0).
    Desc,
}

impl Direction {
    /// Apply this direction to an ascending comparison.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Direction::Asc => ordering,
            Direction::Desc => ordering.reverse(),
        }
    }

    pub fn reversed(self) -> Direction {
        match self {
            Direction::Asc => Direction::Desc,
            Direction::Desc => Direction::Asc,
        }
    }

    /// Arrow shown next to a sorted header.
    pub fn arrow(self) -> &'static str {
        match self {
            Direction::Asc => "↑",
            Direction::Desc => "↓",
        }
    }
}

/// The active sort: one column and a direction.
///
/// An absent sort is represented as `Option<SortState>::None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SortState {
    pub column: String,
    pub direction: Direction,
}

impl SortState {
    /// Sort ascending on a column.
    pub fn asc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            direction: Direction::Asc,
        }
    }

    /// Sort descending on a column.
    pub fn desc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            direction: Direction::Desc,
        }
    }

    /// Next sort state after a header click on `column`.
    ///
    /// A different column starts at `first`; the same column flips to the
    /// other direction once, then clears.
    pub fn toggled(
        current: Option<&SortState>,
        column: &str,
        first: Direction,
    ) -> Option<SortState> {
        match current {
            Some(sort) if sort.column == column => {
                (sort.direction == first).then(|| SortState {
                    column: column.to_string(),
                    direction: first.reversed(),
                })
            }
            _ => Some(SortState {
                column: column.to_string(),
                direction: first,
            }),
        }
    }
}
