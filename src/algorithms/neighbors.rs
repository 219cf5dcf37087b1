//! Neighborhood queries (adjacency sets, common neighbors)
//!
//! Primitives for clique-style algorithms that repeatedly intersect
//! neighborhoods. Adjacency follows the store's directedness: undirected
//! stores use the edge list, directed stores treat an arc in either direction
//! as adjacency.

use crate::storage::{GraphStore, VertexKey};
use std::collections::BTreeSet;

/// Vertices adjacent to `key`, excluding `key` itself
///
/// Returns an empty set when `key` is absent.
///
/// # Example
///
/// ```
/// use trueno_graphdb::{adjacent_vertices, GraphStore};
///
/// let mut graph = GraphStore::new(true);
/// graph.insert_edge("A", "B", 1).unwrap();
/// graph.insert_edge("C", "A", 1).unwrap();
///
/// let adjacent: Vec<_> = adjacent_vertices(&graph, "A").into_iter().collect();
/// assert_eq!(adjacent, vec!["B", "C"]);
/// ```
#[must_use]
pub fn adjacent_vertices<'g>(graph: &'g GraphStore, key: &str) -> BTreeSet<&'g str> {
    let Some(vertex) = graph.vertex(key) else {
        return BTreeSet::new();
    };

    let mut adjacent: BTreeSet<&str> = vertex.edges().iter().map(|arc| arc.target()).collect();

    if graph.is_directed() {
        // Incoming arcs only show up in the source's list
        adjacent.extend(
            graph
                .arcs()
                .filter(|(_, arc)| arc.target() == key)
                .map(|(source, _)| source),
        );
    }

    adjacent.remove(key);
    adjacent
}

/// Vertices adjacent to both `si` and `sj`, in ascending key order
///
/// Returns an empty vector if either vertex is absent. Neither `si` nor `sj`
/// is ever part of the result.
///
/// # Example
///
/// ```
/// use trueno_graphdb::{common_neighbors, GraphStore};
///
/// let mut graph = GraphStore::new(false);
/// graph.insert_edge("A", "C", 1).unwrap();
/// graph.insert_edge("B", "C", 1).unwrap();
/// graph.insert_edge("A", "D", 1).unwrap();
///
/// assert_eq!(common_neighbors(&graph, "A", "B"), vec!["C".to_string()]);
/// assert!(common_neighbors(&graph, "A", "missing").is_empty());
/// ```
#[must_use]
pub fn common_neighbors(graph: &GraphStore, si: &str, sj: &str) -> Vec<VertexKey> {
    if !graph.contains_vertex(si) || !graph.contains_vertex(sj) {
        return Vec::new();
    }

    let left = adjacent_vertices(graph, si);
    let right = adjacent_vertices(graph, sj);

    left.intersection(&right)
        .filter(|&&key| key != si && key != sj)
        .map(|&key| key.to_owned())
        .collect()
}
