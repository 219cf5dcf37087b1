//! Keyed adjacency-list graph store
//!
//! Vertices live in an ordered map keyed by name. Each vertex owns a vector of
//! outgoing edge records in insertion order. Undirected graphs store every
//! edge as two mirrored records, one in each endpoint's list, and count it
//! once in `edge_count`.
//!
//! ```text
//! insert_edge("A", "B", 5) on an undirected store:
//!
//!   "A" { degree: 1, edges: [→ "B" (5)] }
//!   "B" { degree: 1, edges: [→ "A" (5)] }
//!   edge_count: 1
//! ```

use crate::config::StoreConfig;
use crate::error::{GraphError, Result};
use std::collections::BTreeMap;
use tracing::{debug, trace};

/// Vertex identifier
pub type VertexKey = String;

/// Vertex/edge flag conventionally set when a traversal first reaches an item
pub const DISCOVERED_BIT: u32 = 1 << 0;

/// Vertex/edge flag conventionally set when a traversal has finished an item
pub const PROCESSED_BIT: u32 = 1 << 1;

/// One outgoing arc in a vertex's adjacency list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeRecord {
    pub(crate) target: VertexKey,
    pub(crate) weight: i32,
    pub(crate) edge_bits: u32,
}

impl EdgeRecord {
    fn new(target: &str, weight: i32) -> Self {
        Self {
            target: target.to_owned(),
            weight,
            edge_bits: 0,
        }
    }

    /// Neighbor this arc points to
    #[must_use]
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Edge weight
    #[must_use]
    pub const fn weight(&self) -> i32 {
        self.weight
    }

    /// Caller-defined flag bits
    #[must_use]
    pub const fn edge_bits(&self) -> u32 {
        self.edge_bits
    }
}

/// Per-vertex data: degree, flags and the owned adjacency list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VertexRecord {
    pub(crate) degree: usize,
    pub(crate) vertex_bits: u32,
    pub(crate) edges: Vec<EdgeRecord>,
}

impl VertexRecord {
    /// Number of outgoing arcs
    #[must_use]
    pub const fn degree(&self) -> usize {
        self.degree
    }

    /// Caller-defined flag bits
    #[must_use]
    pub const fn vertex_bits(&self) -> u32 {
        self.vertex_bits
    }

    /// Outgoing arcs in insertion order
    #[must_use]
    pub fn edges(&self) -> &[EdgeRecord] {
        &self.edges
    }

    pub(crate) fn position(&self, target: &str) -> Option<usize> {
        self.edges.iter().position(|arc| arc.target == target)
    }

    fn push_edge(&mut self, arc: EdgeRecord) {
        self.edges.push(arc);
        self.degree += 1;
    }

    fn remove_edge_at(&mut self, idx: usize) -> EdgeRecord {
        self.degree = self.degree.saturating_sub(1);
        self.edges.remove(idx)
    }
}

/// In-memory graph keyed by vertex name
///
/// `Clone` is a full deep copy: no edge record is ever shared between two
/// stores. [`GraphStore::take`] moves the content out and leaves the source
/// empty.
///
/// # Example
///
/// ```
/// use trueno_graphdb::GraphStore;
///
/// let mut graph = GraphStore::new(false);
/// graph.insert_edge("A", "B", 1).unwrap();
/// graph.insert_edge("A", "C", 1).unwrap();
/// graph.insert_edge("B", "C", 1).unwrap();
///
/// assert_eq!(graph.num_vertices(), 3);
/// assert_eq!(graph.num_edges(), 3);
/// assert_eq!(graph.common_neighbors("A", "B"), vec!["C".to_string()]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct GraphStore {
    pub(crate) vertices: BTreeMap<VertexKey, VertexRecord>,
    pub(crate) edge_count: usize,
    pub(crate) directed: bool,
    pub(crate) config: StoreConfig,
}

impl GraphStore {
    /// Create an empty store with the default configuration
    #[must_use]
    pub fn new(directed: bool) -> Self {
        Self::with_config(directed, StoreConfig::default())
    }

    /// Create an empty store with an explicit configuration
    #[must_use]
    pub fn with_config(directed: bool, config: StoreConfig) -> Self {
        Self {
            vertices: BTreeMap::new(),
            edge_count: 0,
            directed,
            config,
        }
    }

    /// Store configuration
    #[must_use]
    pub const fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Drop all content and fix the directedness for subsequent operations
    ///
    /// `expected_vertex_count` is a sizing hint only; the ordered vertex map
    /// has no capacity to reserve.
    pub fn initialize(&mut self, expected_vertex_count: usize, directed: bool) {
        debug!(
            expected_vertex_count,
            directed,
            dropped_vertices = self.vertices.len(),
            dropped_edges = self.edge_count,
            "Initializing graph store"
        );
        self.vertices.clear();
        self.edge_count = 0;
        self.directed = directed;
    }

    /// Move the content out, leaving an empty store with the same
    /// directedness and configuration behind
    #[must_use]
    pub fn take(&mut self) -> Self {
        let empty = Self::with_config(self.directed, self.config.clone());
        std::mem::replace(self, empty)
    }

    /// Whether edges are one-way arcs
    #[must_use]
    pub const fn is_directed(&self) -> bool {
        self.directed
    }

    /// Number of vertices
    #[must_use]
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Number of edges (an undirected edge counts once)
    #[must_use]
    pub const fn num_edges(&self) -> usize {
        self.edge_count
    }

    /// Check a key against the configured bounds
    ///
    /// # Errors
    ///
    /// Returns `InvalidKey` for empty keys or keys containing whitespace, and
    /// `KeyTooLong` for keys longer than `max_key_len` bytes.
    pub fn validate_key(&self, key: &str) -> Result<()> {
        if key.is_empty() || key.chars().any(char::is_whitespace) {
            return Err(GraphError::InvalidKey(key.to_owned()));
        }
        if key.len() > self.config.max_key_len {
            return Err(GraphError::KeyTooLong {
                len: key.len(),
                max: self.config.max_key_len,
            });
        }
        Ok(())
    }

    /// Insert a vertex with degree 0; a no-op if it already exists
    ///
    /// # Errors
    ///
    /// Returns an error if `key` fails [`GraphStore::validate_key`].
    pub fn insert_vertex(&mut self, key: &str) -> Result<()> {
        self.validate_key(key)?;
        self.ensure_vertex(key);
        Ok(())
    }

    /// Remove a vertex and every arc into or out of it
    ///
    /// # Errors
    ///
    /// Returns `VertexNotFound` (and changes nothing) if `key` is absent.
    pub fn delete_vertex(&mut self, key: &str) -> Result<()> {
        if !self.vertices.contains_key(key) {
            return Err(GraphError::VertexNotFound(key.to_owned()));
        }
        let removed = self.detach(key);
        self.vertices.remove(key);
        debug!(vertex = key, removed_edges = removed, "Deleted vertex");
        Ok(())
    }

    /// Remove every arc into or out of a vertex, keeping the vertex itself
    ///
    /// # Errors
    ///
    /// Returns `VertexNotFound` if `key` is absent.
    pub fn disconnect_vertex(&mut self, key: &str) -> Result<()> {
        if !self.vertices.contains_key(key) {
            return Err(GraphError::VertexNotFound(key.to_owned()));
        }
        let removed = self.detach(key);
        debug!(vertex = key, removed_edges = removed, "Disconnected vertex");
        Ok(())
    }

    /// Insert edge `x → y` (plus its mirror when undirected)
    ///
    /// Unknown endpoints are created. Re-inserting an existing edge
    /// overwrites its weight and does not change `num_edges`.
    ///
    /// # Errors
    ///
    /// Returns an error for an invalid key, or `SelfLoop` when `x == y` on an
    /// undirected store. Nothing is changed on error.
    pub fn insert_edge(&mut self, x: &str, y: &str, weight: i32) -> Result<()> {
        self.validate_key(x)?;
        self.validate_key(y)?;
        if !self.directed && x == y {
            return Err(GraphError::SelfLoop(x.to_owned()));
        }

        self.ensure_vertex(y);
        let created = self.upsert_arc(x, y, weight);
        if !self.directed {
            self.upsert_arc(y, x, weight);
        }
        if created {
            self.edge_count += 1;
        }
        trace!(from = x, to = y, weight, created, "Inserted edge");
        Ok(())
    }

    /// Remove edge `x → y` (plus its mirror when undirected)
    ///
    /// # Errors
    ///
    /// Returns `EdgeNotFound` (and changes nothing) if either endpoint or the
    /// edge itself is absent.
    pub fn delete_edge(&mut self, x: &str, y: &str) -> Result<()> {
        let not_found = || GraphError::EdgeNotFound {
            from: x.to_owned(),
            to: y.to_owned(),
        };

        // Locate both sides before touching either
        let forward = self.arc_position(x, y).ok_or_else(not_found)?;
        let mirror = if self.directed {
            None
        } else {
            Some(self.arc_position(y, x).ok_or_else(not_found)?)
        };

        if let Some(vertex) = self.vertices.get_mut(x) {
            vertex.remove_edge_at(forward);
        }
        if let (Some(idx), Some(vertex)) = (mirror, self.vertices.get_mut(y)) {
            vertex.remove_edge_at(idx);
        }
        self.edge_count = self.edge_count.saturating_sub(1);
        trace!(from = x, to = y, "Deleted edge");
        Ok(())
    }

    /// Vertices adjacent to both `si` and `sj`, in ascending key order
    ///
    /// Empty when either vertex is absent.
    #[must_use]
    pub fn common_neighbors(&self, si: &str, sj: &str) -> Vec<VertexKey> {
        crate::algorithms::common_neighbors(self, si, sj)
    }

    /// Whether a vertex exists
    #[must_use]
    pub fn contains_vertex(&self, key: &str) -> bool {
        self.vertices.contains_key(key)
    }

    /// Whether arc `x → y` exists
    #[must_use]
    pub fn contains_edge(&self, x: &str, y: &str) -> bool {
        self.arc_position(x, y).is_some()
    }

    /// Vertex record
    #[must_use]
    pub fn vertex(&self, key: &str) -> Option<&VertexRecord> {
        self.vertices.get(key)
    }

    /// Outgoing arcs of a vertex
    #[must_use]
    pub fn edges(&self, key: &str) -> Option<&[EdgeRecord]> {
        self.vertices.get(key).map(VertexRecord::edges)
    }

    /// Recorded degree of a vertex
    #[must_use]
    pub fn degree(&self, key: &str) -> Option<usize> {
        self.vertices.get(key).map(VertexRecord::degree)
    }

    /// Weight of arc `x → y`
    #[must_use]
    pub fn edge_weight(&self, x: &str, y: &str) -> Option<i32> {
        self.arc(x, y).map(EdgeRecord::weight)
    }

    /// Iterate vertices in ascending key order
    pub fn vertices(&self) -> impl Iterator<Item = (&str, &VertexRecord)> + '_ {
        self.vertices.iter().map(|(key, vertex)| (key.as_str(), vertex))
    }

    /// Iterate every stored arc as `(source, record)`
    ///
    /// Undirected edges appear twice, once from each endpoint.
    pub fn arcs(&self) -> impl Iterator<Item = (&str, &EdgeRecord)> + '_ {
        self.vertices()
            .flat_map(|(key, vertex)| vertex.edges.iter().map(move |arc| (key, arc)))
    }

    /// Flag bits of a vertex
    #[must_use]
    pub fn vertex_bits(&self, key: &str) -> Option<u32> {
        self.vertices.get(key).map(VertexRecord::vertex_bits)
    }

    /// Replace the flag bits of a vertex
    ///
    /// # Errors
    ///
    /// Returns `VertexNotFound` if `key` is absent.
    pub fn set_vertex_bits(&mut self, key: &str, bits: u32) -> Result<()> {
        let vertex = self
            .vertices
            .get_mut(key)
            .ok_or_else(|| GraphError::VertexNotFound(key.to_owned()))?;
        vertex.vertex_bits = bits;
        Ok(())
    }

    /// Flag bits of arc `x → y`
    #[must_use]
    pub fn edge_bits(&self, x: &str, y: &str) -> Option<u32> {
        self.arc(x, y).map(EdgeRecord::edge_bits)
    }

    /// Replace the flag bits of edge `x → y` (and its mirror when undirected)
    ///
    /// # Errors
    ///
    /// Returns `EdgeNotFound` if the edge is absent.
    pub fn set_edge_bits(&mut self, x: &str, y: &str, bits: u32) -> Result<()> {
        let not_found = || GraphError::EdgeNotFound {
            from: x.to_owned(),
            to: y.to_owned(),
        };
        if !self.contains_edge(x, y) || (!self.directed && !self.contains_edge(y, x)) {
            return Err(not_found());
        }

        if let Some(arc) = self.arc_mut(x, y) {
            arc.edge_bits = bits;
        }
        if !self.directed {
            if let Some(arc) = self.arc_mut(y, x) {
                arc.edge_bits = bits;
            }
        }
        Ok(())
    }

    /// Reset every vertex and edge flag to zero
    pub fn clear_bits(&mut self) {
        for vertex in self.vertices.values_mut() {
            vertex.vertex_bits = 0;
            for arc in &mut vertex.edges {
                arc.edge_bits = 0;
            }
        }
    }

    fn ensure_vertex(&mut self, key: &str) {
        if !self.vertices.contains_key(key) {
            self.vertices.insert(key.to_owned(), VertexRecord::default());
            trace!(vertex = key, "Inserted vertex");
        }
    }

    /// Set the weight of `from → to`, creating the arc (and `from`) if
    /// needed. Returns whether a new arc was created.
    fn upsert_arc(&mut self, from: &str, to: &str, weight: i32) -> bool {
        let vertex = self.vertices.entry(from.to_owned()).or_default();
        if let Some(idx) = vertex.position(to) {
            vertex.edges[idx].weight = weight;
            false
        } else {
            vertex.push_edge(EdgeRecord::new(to, weight));
            true
        }
    }

    fn arc_position(&self, from: &str, to: &str) -> Option<usize> {
        self.vertices.get(from).and_then(|vertex| vertex.position(to))
    }

    fn arc(&self, from: &str, to: &str) -> Option<&EdgeRecord> {
        let vertex = self.vertices.get(from)?;
        vertex.position(to).map(|idx| &vertex.edges[idx])
    }

    fn arc_mut(&mut self, from: &str, to: &str) -> Option<&mut EdgeRecord> {
        let vertex = self.vertices.get_mut(from)?;
        let idx = vertex.position(to)?;
        Some(&mut vertex.edges[idx])
    }

    /// Remove every arc incident to `key` and return how many edges went away
    fn detach(&mut self, key: &str) -> usize {
        let Some(vertex) = self.vertices.get_mut(key) else {
            return 0;
        };
        let outgoing = std::mem::take(&mut vertex.edges);
        vertex.degree = 0;

        let mut removed = outgoing.len();
        if self.directed {
            for (source, vertex) in &mut self.vertices {
                if source == key {
                    continue;
                }
                if let Some(idx) = vertex.position(key) {
                    vertex.remove_edge_at(idx);
                    removed += 1;
                }
            }
        } else {
            for arc in &outgoing {
                if let Some(neighbor) = self.vertices.get_mut(&arc.target) {
                    if let Some(idx) = neighbor.position(key) {
                        neighbor.remove_edge_at(idx);
                    }
                }
            }
        }

        self.edge_count = self.edge_count.saturating_sub(removed);
        removed
    }
}
