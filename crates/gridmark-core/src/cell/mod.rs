//! Cell references
//!
//! [`CellAddress`] is the parsed form of an A1 reference; [`to_indexes`]
//! is the shortcut used when only the zero-based position is needed.

mod address;

pub use address::{to_indexes, CellAddress};
