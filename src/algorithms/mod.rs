//! Graph algorithm primitives
//!
//! Building blocks for partitioning/clique algorithms that live outside this
//! crate.

pub mod neighbors;

pub use neighbors::{adjacent_vertices, common_neighbors};
