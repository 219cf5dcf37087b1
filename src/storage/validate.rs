//! Consistency validator
//!
//! Walks every vertex and arc, recomputes the structural invariants
//! independently of the mutation routines and reports every mismatch found.
//! A clean report is the expected outcome; findings indicate a bug in a
//! mutation routine, never a normal runtime condition.

use super::GraphStore;
use crate::config::Verbosity;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;
use tracing::{debug, warn};

/// One invariant violation
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum Violation {
    /// Recorded degree differs from the edge-list length
    #[error("vertex '{vertex}' records degree {recorded} but owns {actual} edges")]
    DegreeMismatch {
        /// Vertex key
        vertex: String,
        /// Stored degree
        recorded: usize,
        /// Edge-list length
        actual: usize,
    },

    /// Arc points at a vertex that does not exist
    #[error("edge '{vertex}' -> '{target}' targets a missing vertex")]
    DanglingTarget {
        /// Source vertex
        vertex: String,
        /// Missing target
        target: String,
    },

    /// Undirected arc has no reverse arc
    #[error("edge '{from}' -> '{to}' has no mirror")]
    MissingMirror {
        /// Source vertex
        from: String,
        /// Target vertex
        to: String,
    },

    /// Undirected arc and its reverse disagree on weight
    #[error("edge '{from}' -> '{to}' weighs {weight} but its mirror weighs {mirror_weight}")]
    MirrorWeightMismatch {
        /// Source vertex
        from: String,
        /// Target vertex
        to: String,
        /// Weight of `from -> to`
        weight: i32,
        /// Weight of `to -> from`
        mirror_weight: i32,
    },

    /// Same ordered pair appears more than once
    #[error("edge '{from}' -> '{to}' is stored more than once")]
    DuplicateEdge {
        /// Source vertex
        from: String,
        /// Target vertex
        to: String,
    },

    /// Stored edge count differs from the recomputed one
    #[error("graph records {recorded} edges but holds {actual}")]
    EdgeCountMismatch {
        /// Stored `edge_count`
        recorded: usize,
        /// Recomputed count
        actual: usize,
    },
}

/// Result of [`GraphStore::check_graph`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Number of vertices walked
    pub vertices_checked: usize,
    /// Number of arcs walked (undirected edges count twice)
    pub arcs_checked: usize,
    /// Every violation found, in discovery order
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    /// Whether no violation was found
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.violations.is_empty()
    }
}

impl GraphStore {
    /// Check every structural invariant and report all violations
    ///
    /// Checks, per vertex: recorded degree against edge-list length; per arc:
    /// target exists, no duplicate pair, and (undirected) a mirror with the
    /// same weight. Finally the stored edge count is compared with the count
    /// recomputed from the arcs.
    ///
    /// Logging follows the store's [`Verbosity`].
    ///
    /// # Example
    ///
    /// ```
    /// use trueno_graphdb::GraphStore;
    ///
    /// let mut graph = GraphStore::new(false);
    /// graph.insert_edge("A", "B", 1).unwrap();
    /// graph.delete_vertex("A").unwrap();
    ///
    /// let report = graph.check_graph();
    /// assert!(report.is_consistent());
    /// assert_eq!(report.vertices_checked, 1);
    /// ```
    #[must_use]
    pub fn check_graph(&self) -> ValidationReport {
        let mut report = ValidationReport::default();

        for (key, vertex) in &self.vertices {
            report.vertices_checked += 1;

            if vertex.degree != vertex.edges.len() {
                report.violations.push(Violation::DegreeMismatch {
                    vertex: key.clone(),
                    recorded: vertex.degree,
                    actual: vertex.edges.len(),
                });
            }

            let mut seen = HashSet::with_capacity(vertex.edges.len());
            for arc in &vertex.edges {
                report.arcs_checked += 1;

                if !seen.insert(arc.target.as_str()) {
                    report.violations.push(Violation::DuplicateEdge {
                        from: key.clone(),
                        to: arc.target.clone(),
                    });
                }

                let Some(target) = self.vertices.get(&arc.target) else {
                    report.violations.push(Violation::DanglingTarget {
                        vertex: key.clone(),
                        target: arc.target.clone(),
                    });
                    continue;
                };

                if self.directed {
                    continue;
                }
                match target.position(key) {
                    None => report.violations.push(Violation::MissingMirror {
                        from: key.clone(),
                        to: arc.target.clone(),
                    }),
                    Some(idx) if target.edges[idx].weight != arc.weight => {
                        report.violations.push(Violation::MirrorWeightMismatch {
                            from: key.clone(),
                            to: arc.target.clone(),
                            weight: arc.weight,
                            mirror_weight: target.edges[idx].weight,
                        });
                    }
                    Some(_) => {}
                }
            }
        }

        let actual = if self.directed {
            report.arcs_checked
        } else {
            report.arcs_checked / 2
        };
        if actual != self.edge_count {
            report.violations.push(Violation::EdgeCountMismatch {
                recorded: self.edge_count,
                actual,
            });
        }

        self.log_report(&report);
        report
    }

    fn log_report(&self, report: &ValidationReport) {
        match self.config.verbosity {
            Verbosity::Quiet => {}
            Verbosity::Normal => {
                if !report.is_consistent() {
                    warn!(
                        violations = report.violations.len(),
                        vertices = report.vertices_checked,
                        arcs = report.arcs_checked,
                        "Graph consistency check failed"
                    );
                }
            }
            Verbosity::Noisy => {
                for violation in &report.violations {
                    warn!(%violation, "Graph consistency violation");
                }
                debug!(
                    violations = report.violations.len(),
                    vertices = report.vertices_checked,
                    arcs = report.arcs_checked,
                    "Graph consistency check finished"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StoreConfig;
    use crate::storage::EdgeRecord;

    fn square() -> GraphStore {
        let config = StoreConfig::default().with_verbosity(Verbosity::Noisy);
        let mut graph = GraphStore::with_config(false, config);
        graph.insert_edge("A", "B", 1).unwrap();
        graph.insert_edge("B", "C", 2).unwrap();
        graph.insert_edge("C", "D", 3).unwrap();
        graph.insert_edge("D", "A", 4).unwrap();
        graph
    }

    #[test]
    fn test_clean_graph() {
        let report = square().check_graph();
        assert!(report.is_consistent(), "{:?}", report.violations);
        assert_eq!(report.vertices_checked, 4);
        assert_eq!(report.arcs_checked, 8);
    }

    #[test]
    fn test_detects_degree_mismatch() {
        let mut graph = square();
        if let Some(vertex) = graph.vertices.get_mut("A") {
            vertex.degree = 7;
        }

        let report = graph.check_graph();
        assert_eq!(
            report.violations,
            vec![Violation::DegreeMismatch {
                vertex: "A".to_string(),
                recorded: 7,
                actual: 2,
            }]
        );
    }

    #[test]
    fn test_detects_missing_mirror_and_count() {
        let mut graph = square();
        if let Some(vertex) = graph.vertices.get_mut("B") {
            vertex.edges.retain(|arc| arc.target != "A");
            vertex.degree = vertex.edges.len();
        }

        let report = graph.check_graph();
        assert!(report.violations.contains(&Violation::MissingMirror {
            from: "A".to_string(),
            to: "B".to_string(),
        }));
        // 7 arcs / 2 rounds down to 3, stored count is 4
        assert!(report.violations.contains(&Violation::EdgeCountMismatch {
            recorded: 4,
            actual: 3,
        }));
    }

    #[test]
    fn test_detects_weight_mismatch() {
        let mut graph = square();
        if let Some(vertex) = graph.vertices.get_mut("C") {
            vertex.edges[0].weight = 99;
        }

        let report = graph.check_graph();
        assert_eq!(report.violations.len(), 2);
        assert!(report
            .violations
            .iter()
            .all(|v| matches!(v, Violation::MirrorWeightMismatch { .. })));
    }

    #[test]
    fn test_reports_every_violation() {
        let mut graph = square();
        if let Some(vertex) = graph.vertices.get_mut("A") {
            vertex.edges.push(EdgeRecord {
                target: "ghost".to_string(),
                weight: 0,
                edge_bits: 0,
            });
            vertex.edges.push(EdgeRecord {
                target: "B".to_string(),
                weight: 1,
                edge_bits: 0,
            });
        }
        graph.edge_count = 10;

        let report = graph.check_graph();
        let has = |pred: fn(&Violation) -> bool| report.violations.iter().any(pred);
        assert!(has(|v| matches!(v, Violation::DegreeMismatch { .. })));
        assert!(has(|v| matches!(v, Violation::DanglingTarget { .. })));
        assert!(has(|v| matches!(v, Violation::DuplicateEdge { .. })));
        assert!(has(|v| matches!(v, Violation::EdgeCountMismatch { .. })));
    }

    #[test]
    fn test_directed_skips_mirror_check() {
        let mut graph = GraphStore::new(true);
        graph.insert_edge("A", "B", 1).unwrap();
        graph.insert_edge("B", "C", 1).unwrap();

        let report = graph.check_graph();
        assert!(report.is_consistent());
        assert_eq!(report.arcs_checked, 2);
    }

    #[test]
    fn test_violation_display() {
        let violation = Violation::EdgeCountMismatch {
            recorded: 2,
            actual: 1,
        };
        assert_eq!(violation.to_string(), "graph records 2 edges but holds 1");
    }
}
