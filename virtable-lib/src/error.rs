//! Error types

use crate::column::FilterKind;
use crate::view::FieldId;

/// Error returned by [`TableView`](crate::TableView) operations.
///
/// These report wiring mistakes by the caller (a control bound to a column
/// that does not exist, a range control on a text column). The view is left
/// unchanged when one is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ViewError {
    /// No column has this key.
    #[error("Column '{0}' not found")]
    UnknownColumn(String),

    /// The column's filter kind is `none`.
    #[error("Column '{0}' cannot be filtered")]
    NotFilterable(String),

    /// The column is marked unsortable.
    #[error("Column '{0}' cannot be sorted")]
    NotSortable(String),

    /// A field or filter value of the wrong shape for the column.
    #[error("Column '{column}' takes a {kind} filter")]
    KindMismatch { column: String, kind: FilterKind },

    /// A select value that is not one of the column's options.
    #[error("'{value}' is not an option of column '{column}'")]
    UnknownOption { column: String, value: String },

    /// Input arrived for a field whose control has been unmounted.
    #[error("Field '{0}' is not mounted")]
    Unmounted(FieldId),
}
