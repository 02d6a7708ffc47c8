//! Filtering and sorting over a row store.

mod engine;
mod filter;
mod order;

pub use engine::*;
pub use filter::*;
pub use order::*;
