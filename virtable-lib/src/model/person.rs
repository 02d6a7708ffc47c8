//! The person record displayed by the demo table.

use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::{TableRow, Value};
use crate::column::{Column, FilterKind};

/// Relationship status of a [`Person`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Complicated,
    Relationship,
    Single,
}

impl Status {
    /// Every status, in display order.
    pub const ALL: [Status; 3] = [Status::Complicated, Status::Relationship, Status::Single];

    /// Lowercase name, as shown in select controls.
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Complicated => "complicated",
            Status::Relationship => "relationship",
            Status::Single => "single",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown status name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown status '{0}'")]
pub struct ParseStatusError(pub String);

impl FromStr for Status {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Status::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ParseStatusError(s.to_string()))
    }
}

/// A generated person record.
///
/// Records are immutable once placed in a [`RowStore`](crate::RowStore).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    pub age: u32,
    pub visits: u32,
    pub status: Status,
    pub progress: u8,
    pub created_at: DateTime<Utc>,
}

impl Person {
    /// Column descriptors for the person table.
    ///
    /// `age`, `visits` and `progress` use range filters, `status` a select
    /// filter, everything else a text filter. Number and date columns sort
    /// descending on the first click, string columns ascending.
    pub fn columns() -> Vec<Column<Person>> {
        vec![
            Column::new("id", "ID").sort_desc_first(true),
            Column::new("firstName", "First Name"),
            Column::new("lastName", "Last Name").accessor(|p| p.last_name.as_str().into()),
            Column::new("age", "Age")
                .filter(FilterKind::Range)
                .sort_desc_first(true),
            Column::new("visits", "Visits")
                .filter(FilterKind::Range)
                .sort_desc_first(true),
            Column::new("status", "Status")
                .filter(FilterKind::Select)
                .options(Status::ALL.iter().map(Status::as_str)),
            Column::new("progress", "Profile Progress")
                .filter(FilterKind::Range)
                .sort_desc_first(true),
            Column::new("createdAt", "Created At").sort_desc_first(true),
        ]
    }
}

impl TableRow for Person {
    type Key = u64;

    fn key(&self) -> u64 {
        self.id
    }

    fn value(&self, column: &str) -> Value {
        match column {
            "id" => self.id.into(),
            "firstName" => self.first_name.as_str().into(),
            "lastName" => self.last_name.as_str().into(),
            "age" => self.age.into(),
            "visits" => self.visits.into(),
            "status" => self.status.as_str().into(),
            "progress" => self.progress.into(),
            "createdAt" => self.created_at.into(),
            _ => Value::Null,
        }
    }
}
