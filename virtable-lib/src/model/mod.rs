//! Row data model

mod person;
mod row;
mod value;

pub use person::*;
pub use row::*;
pub use value::*;
