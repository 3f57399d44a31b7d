//! Document Model - Tables and the block items that live inside them
//!
//! This crate provides the in-memory tree for the table portion of a
//! WordprocessingML document: the column grid, rows, cells, merged regions and
//! the conditional-formatting bands derived from a table's look options.
//! Serialization lives in the `store` crate.

mod node;
mod node_id;
mod error;
mod paragraph;
mod body;
pub mod table;

pub use node::*;
pub use node_id::*;
pub use error::*;
pub use paragraph::*;
pub use body::*;
pub use table::*;
