//! trueno-graphdb: in-memory graph database keyed by vertex name
//!
//! # Overview
//!
//! trueno-graphdb stores a mutable graph whose vertices are identified by short
//! strings. It is the building block for graph algorithms (clique
//! partitioning and friends) that need fast vertex lookup, adjacency
//! traversal and structural mutation that never leaves the graph
//! inconsistent.
//!
//! # Quick Start
//!
//! ```
//! use trueno_graphdb::GraphStore;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut graph = GraphStore::new(false);
//! graph.insert_edge("A", "B", 1)?;
//! graph.insert_edge("A", "C", 1)?;
//! graph.insert_edge("B", "C", 1)?;
//!
//! assert_eq!(graph.common_neighbors("A", "B"), vec!["C".to_string()]);
//!
//! // Dump and reload
//! let mut buf = Vec::new();
//! graph.write_graph(&mut buf)?;
//! let mut loaded = GraphStore::default();
//! loaded.read_graph(buf.as_slice())?;
//! assert!(loaded.check_graph().is_consistent());
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! # Architecture
//!
//! - **Storage**: ordered vertex map, one owned `Vec` of edge records per vertex
//! - **Undirected edges**: two mirrored records kept in sync by every mutation
//! - **Persistence**: line-oriented text dump (`read_graph` / `write_graph`)
//! - **Validation**: `check_graph` recomputes every invariant and reports findings

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod algorithms;
pub mod config;
pub mod error;
pub mod storage;

// Re-export core types
pub use algorithms::{adjacent_vertices, common_neighbors};
pub use config::{StoreConfig, Verbosity, MAX_VERTEX_KEY_LEN};
pub use error::{GraphError, Result};
pub use storage::{
    EdgeRecord, GraphStore, ValidationReport, VertexKey, VertexRecord, Violation, DISCOVERED_BIT,
    PROCESSED_BIT,
};
