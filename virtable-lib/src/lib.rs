//! Filtered, sorted and virtualized tables.
//!
//! The crate splits a large interactive table into a few pure pieces:
//!
//! - [`RowStore`]: the immutable source rows
//! - [`query`]: filter state, sort state and the pure `derive` that turns
//!   them into an ordered row sequence
//! - [`debounce`]: a timer-free debounce state machine for filter inputs
//! - [`virtualizer`]: the window of rows to materialize for a scroll position
//! - [`TableView`]: the orchestrator that wires them together

pub mod column;
pub mod debounce;
pub mod error;
pub mod model;
pub mod query;
pub mod virtualizer;

mod store;
mod view;

pub use column::{Column, FilterKind};
pub use error::ViewError;
pub use store::RowStore;
pub use view::*;
