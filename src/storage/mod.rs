//! Graph storage layer
//!
//! Provides the keyed adjacency-list store, its text dump format and the
//! consistency validator.

pub mod store;
pub mod text;
pub mod validate;

pub use store::{EdgeRecord, GraphStore, VertexKey, VertexRecord, DISCOVERED_BIT, PROCESSED_BIT};
pub use validate::{ValidationReport, Violation};
