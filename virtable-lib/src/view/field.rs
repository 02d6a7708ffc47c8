//! Filter field identifiers.

use std::fmt;

use crate::column::FilterKind;

/// Which control of a column filter a field is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldPart {
    /// The single control of a text or select filter.
    Value,
    /// Lower bound of a range filter.
    Min,
    /// Upper bound of a range filter.
    Max,
}

impl FieldPart {
    /// Parts a column of this kind exposes.
    pub fn for_kind(kind: FilterKind) -> &'static [FieldPart] {
        match kind {
            FilterKind::None => &[],
            FilterKind::Text | FilterKind::Select => &[FieldPart::Value],
            FilterKind::Range => &[FieldPart::Min, FieldPart::Max],
        }
    }

    pub fn fits(self, kind: FilterKind) -> bool {
        FieldPart::for_kind(kind).contains(&self)
    }
}

/// One input control: a column and a part.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldId {
    pub column: String,
    pub part: FieldPart,
}

impl FieldId {
    pub fn new(column: impl Into<String>, part: FieldPart) -> Self {
        Self {
            column: column.into(),
            part,
        }
    }

    /// The text or select control of a column.
    pub fn value(column: impl Into<String>) -> Self {
        Self::new(column, FieldPart::Value)
    }

    /// The min control of a range column.
    pub fn min(column: impl Into<String>) -> Self {
        Self::new(column, FieldPart::Min)
    }

    /// The max control of a range column.
    pub fn max(column: impl Into<String>) -> Self {
        Self::new(column, FieldPart::Max)
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.part {
            FieldPart::Value => f.write_str(&self.column),
            FieldPart::Min => write!(f, "{}.min", self.column),
            FieldPart::Max => write!(f, "{}.max", self.column),
        }
    }
}
