//! Plain-text dump/reload
//!
//! # Format
//!
//! ```text
//! <numVertices> <directedFlag>      directedFlag: 0 = undirected, 1 = directed
//! <vertexKey>                       numVertices lines
//! <source> <target> <weight>        one line per edge
//! ```
//!
//! Undirected edges are written once, from the lexicographically smaller
//! endpoint. Blank lines in the edge section are ignored. Edge lines may
//! name vertices missing from the vertex section; they are created on load.
//!
//! # Errors
//!
//! Loading fails with `Malformed` when the vertex section repeats a key, when
//! a line is not valid UTF-8, and when an undirected file contains a
//! self-loop such as `A A 1` (undirected stores reject self-loops).

use super::GraphStore;
use crate::config::StoreConfig;
use crate::error::{GraphError, Result};
use std::io::{BufRead, ErrorKind, Lines, Write};
use tracing::{debug, warn};

/// Line source that remembers the 1-based number of the last line read
struct NumberedLines<R> {
    lines: Lines<R>,
    line_no: usize,
}

impl<R: BufRead> NumberedLines<R> {
    fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_no: 0,
        }
    }

    fn next_line(&mut self) -> Result<Option<String>> {
        let Some(line) = self.lines.next() else {
            return Ok(None);
        };
        self.line_no += 1;
        match line {
            Ok(line) => Ok(Some(line)),
            Err(err) if err.kind() == ErrorKind::InvalidData => {
                Err(self.malformed("invalid UTF-8"))
            }
            Err(err) => Err(err.into()),
        }
    }

    fn malformed(&self, reason: impl Into<String>) -> GraphError {
        GraphError::malformed(self.line_no, reason)
    }
}

impl GraphStore {
    /// Replace the store's content with a graph parsed from `reader`
    ///
    /// The directedness is taken from the header. The configuration is kept.
    ///
    /// # Errors
    ///
    /// Returns `Malformed` on any format violation (bad header, wrong token
    /// count, invalid, oversized or repeated key, non-integer weight, fewer
    /// vertex lines than announced, invalid UTF-8) and `Io` if the reader fails. On error the store
    /// is reset to empty.
    ///
    /// # Example
    ///
    /// ```
    /// use trueno_graphdb::GraphStore;
    ///
    /// let text = "3 0\nA\nB\nC\nA B 4\nB C -2\n";
    /// let mut graph = GraphStore::default();
    /// graph.read_graph(text.as_bytes()).unwrap();
    ///
    /// assert_eq!(graph.num_vertices(), 3);
    /// assert_eq!(graph.num_edges(), 2);
    /// assert_eq!(graph.edge_weight("C", "B"), Some(-2));
    /// ```
    pub fn read_graph<R: BufRead>(&mut self, reader: R) -> Result<()> {
        match Self::parse_text(reader, self.config.clone()) {
            Ok(parsed) => {
                *self = parsed;
                debug!(
                    vertices = self.num_vertices(),
                    edges = self.num_edges(),
                    directed = self.directed,
                    "Read graph"
                );
                Ok(())
            }
            Err(err) => {
                let directed = self.directed;
                self.initialize(0, directed);
                warn!(error = %err, "Failed to read graph, store reset to empty");
                Err(err)
            }
        }
    }

    /// Write the store in the text format
    ///
    /// # Errors
    ///
    /// Returns `Io` if the writer fails.
    pub fn write_graph<W: Write>(&self, mut writer: W) -> Result<()> {
        writeln!(writer, "{} {}", self.num_vertices(), u8::from(self.directed))?;
        for key in self.vertices.keys() {
            writeln!(writer, "{key}")?;
        }

        let mut written = 0_usize;
        for (source, arc) in self.arcs() {
            if self.directed || source < arc.target() {
                writeln!(writer, "{source} {} {}", arc.target, arc.weight)?;
                written += 1;
            }
        }
        writer.flush()?;

        debug!(
            vertices = self.num_vertices(),
            edges = written,
            "Wrote graph"
        );
        Ok(())
    }

    fn parse_text<R: BufRead>(reader: R, config: StoreConfig) -> Result<Self> {
        let mut lines = NumberedLines::new(reader);

        let header = lines
            .next_line()?
            .ok_or_else(|| GraphError::malformed(1, "missing header"))?;
        let tokens: Vec<&str> = header.split_whitespace().collect();
        let [count, flag] = tokens.as_slice() else {
            return Err(lines.malformed(format!(
                "expected '<numVertices> <directedFlag>', found {} tokens",
                tokens.len()
            )));
        };
        let num_vertices: usize = count
            .parse()
            .map_err(|_| lines.malformed(format!("invalid vertex count '{count}'")))?;
        let directed = match *flag {
            "0" => false,
            "1" => true,
            other => {
                return Err(lines.malformed(format!("invalid directed flag '{other}'")));
            }
        };

        let mut graph = Self::with_config(directed, config);

        for _ in 0..num_vertices {
            let Some(line) = lines.next_line()? else {
                return Err(GraphError::malformed(
                    lines.line_no + 1,
                    format!(
                        "expected {num_vertices} vertex lines, input ended after {}",
                        graph.num_vertices()
                    ),
                ));
            };
            let tokens: Vec<&str> = line.split_whitespace().collect();
            let [key] = tokens.as_slice() else {
                return Err(lines.malformed(format!(
                    "expected one vertex key, found {} tokens",
                    tokens.len()
                )));
            };
            if graph.contains_vertex(key) {
                return Err(lines.malformed(format!("duplicate vertex key '{key}'")));
            }
            graph
                .insert_vertex(key)
                .map_err(|err| lines.malformed(err.to_string()))?;
        }

        while let Some(line) = lines.next_line()? {
            let tokens: Vec<&str> = line.split_whitespace().collect();
            if tokens.is_empty() {
                continue;
            }
            let [source, target, weight] = tokens.as_slice() else {
                return Err(lines.malformed(format!(
                    "expected '<source> <target> <weight>', found {} tokens",
                    tokens.len()
                )));
            };
            let weight: i32 = weight
                .parse()
                .map_err(|_| lines.malformed(format!("invalid weight '{weight}'")))?;
            graph
                .insert_edge(source, target, weight)
                .map_err(|err| lines.malformed(err.to_string()))?;
        }

        Ok(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_to_string(graph: &GraphStore) -> String {
        let mut buf = Vec::new();
        graph.write_graph(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn assert_malformed_at(text: &str, expected_line: usize) {
        let mut graph = GraphStore::new(false);
        graph.insert_edge("keep", "me", 1).unwrap();

        match graph.read_graph(text.as_bytes()) {
            Err(GraphError::Malformed { line, .. }) => assert_eq!(line, expected_line, "{text:?}"),
            other => panic!("expected Malformed for {text:?}, got {other:?}"),
        }
        assert_eq!(graph.num_vertices(), 0);
        assert_eq!(graph.num_edges(), 0);
    }

    #[test]
    fn test_write_undirected_lists_edge_once() {
        let mut graph = GraphStore::new(false);
        graph.insert_edge("B", "A", 5).unwrap();
        graph.insert_edge("B", "C", -1).unwrap();

        assert_eq!(write_to_string(&graph), "3 0\nA\nB\nC\nA B 5\nB C -1\n");
    }

    #[test]
    fn test_write_directed_lists_every_arc() {
        let mut graph = GraphStore::new(true);
        graph.insert_edge("B", "A", 5).unwrap();
        graph.insert_edge("A", "B", 7).unwrap();
        graph.insert_vertex("Z").unwrap();

        assert_eq!(write_to_string(&graph), "3 1\nA\nB\nZ\nA B 7\nB A 5\n");
    }

    #[test]
    fn test_write_empty_graph() {
        assert_eq!(write_to_string(&GraphStore::new(false)), "0 0\n");
    }

    #[test]
    fn test_read_sets_directedness_and_keeps_config() {
        let config = StoreConfig::default().with_max_key_len(4);
        let mut graph = GraphStore::with_config(false, config.clone());
        graph.read_graph("2 1\nA\nB\nA B 3\n".as_bytes()).unwrap();

        assert!(graph.is_directed());
        assert_eq!(graph.num_edges(), 1);
        assert!(!graph.contains_edge("B", "A"));
        assert_eq!(graph.config(), &config);
    }

    #[test]
    fn test_read_replaces_content() {
        let mut graph = GraphStore::new(false);
        graph.insert_edge("old", "stuff", 1).unwrap();
        graph.read_graph("1 0\nnew\n".as_bytes()).unwrap();

        assert_eq!(graph.num_vertices(), 1);
        assert!(graph.contains_vertex("new"));
        assert!(!graph.contains_vertex("old"));
    }

    #[test]
    fn test_read_tolerates_blank_lines_and_unlisted_vertices() {
        let mut graph = GraphStore::default();
        graph.read_graph("1 0\nA\n\nA B 1\n\n".as_bytes()).unwrap();

        assert_eq!(graph.num_vertices(), 2);
        assert_eq!(graph.num_edges(), 1);
    }

    #[test]
    fn test_read_malformed_input() {
        assert_malformed_at("", 1);
        assert_malformed_at("3\n", 1);
        assert_malformed_at("x 0\n", 1);
        assert_malformed_at("1 2\nA\n", 1);
        assert_malformed_at("2 0\nA\n", 3);
        assert_malformed_at("2 0\nA\nB C\n", 3);
        assert_malformed_at("2 0\nA\nB\nA B\n", 4);
        assert_malformed_at("2 0\nA\nB\nA B heavy\n", 4);
        assert_malformed_at("2 0\nA\nB\nA B 99999999999\n", 4);
        assert_malformed_at("2 0\nA\nB\nA A 1\n", 4);
        assert_malformed_at("3 0\nA\nA\nA\n", 3);
    }

    #[test]
    fn test_read_header_count_matches_loaded_vertices() {
        let mut graph = GraphStore::default();
        graph.read_graph("3 0\nA\nB\nC\n".as_bytes()).unwrap();
        assert_eq!(graph.num_vertices(), 3);

        let err = graph.read_graph("3 0\nA\nB\nA\n".as_bytes()).unwrap_err();
        assert!(matches!(err, GraphError::Malformed { line: 4, ref reason } if reason.contains("duplicate")));
        assert_eq!(graph.num_vertices(), 0);
    }

    #[test]
    fn test_read_invalid_utf8_is_malformed() {
        let mut graph = GraphStore::new(false);
        graph.insert_edge("keep", "me", 1).unwrap();

        let input: &[u8] = b"2 0\nA\n\xff\xfe\n";
        match graph.read_graph(input) {
            Err(GraphError::Malformed { line, reason }) => {
                assert_eq!(line, 3);
                assert_eq!(reason, "invalid UTF-8");
            }
            other => panic!("expected Malformed, got {other:?}"),
        }
        assert_eq!(graph.num_vertices(), 0);
    }

    #[test]
    fn test_read_rejects_oversized_key() {
        let text = format!("1 0\n{}\n", "k".repeat(257));
        assert_malformed_at(&text, 2);
    }
}
