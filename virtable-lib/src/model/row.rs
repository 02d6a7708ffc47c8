//! The row trait shared by the store, engine and virtualizer.

use std::fmt::Debug;
use std::hash::Hash;

use super::Value;

/// Trait for rows that can be held in a [`RowStore`](crate::RowStore) and
/// displayed through a [`TableView`](crate::TableView).
///
/// # Example
///
/// ```
/// use virtable_lib::model::{TableRow, Value};
///
/// #[derive(Clone)]
/// struct User {
///     id: u32,
///     name: String,
/// }
///
/// impl TableRow for User {
///     type Key = u32;
///
///     fn key(&self) -> u32 {
///         self.id
///     }
///
///     fn value(&self, column: &str) -> Value {
///         match column {
///             "id" => self.id.into(),
///             "name" => self.name.as_str().into(),
///             _ => Value::Null,
///         }
///     }
/// }
/// ```
pub trait TableRow: Clone + 'static {
    /// The key type used to identify this row.
    ///
    /// Keys must stay stable for the lifetime of the row: measured heights
    /// are cached by key, not by position.
    type Key: Clone + Eq + Hash + Debug;

    /// Return a unique key for this row.
    fn key(&self) -> Self::Key;

    /// Read the value for the given column key.
    ///
    /// Unknown columns return [`Value::Null`].
    fn value(&self, column: &str) -> Value;
}
