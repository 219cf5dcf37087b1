//! Error types for graph store operations

use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T, E = GraphError> = std::result::Result<T, E>;

/// Graph store errors
///
/// Every variant is returned before the store is mutated, so a failed call
/// leaves the graph exactly as it was (except [`GraphError::Malformed`] and
/// [`GraphError::Io`] during a read, which reset the store to empty).
#[derive(Debug, Error)]
pub enum GraphError {
    /// Referenced vertex is not in the store
    #[error("vertex '{0}' not found")]
    VertexNotFound(String),

    /// Referenced edge is not in the store
    #[error("edge '{from}' -> '{to}' not found")]
    EdgeNotFound {
        /// Source vertex
        from: String,
        /// Target vertex
        to: String,
    },

    /// Vertex key is empty or contains whitespace
    #[error("invalid vertex key '{0}'")]
    InvalidKey(String),

    /// Vertex key exceeds the configured maximum length
    #[error("vertex key of {len} bytes exceeds maximum of {max}")]
    KeyTooLong {
        /// Key length in bytes
        len: usize,
        /// Configured maximum
        max: usize,
    },

    /// Self-loop requested on an undirected graph
    #[error("self-loop on '{0}' is not allowed in an undirected graph")]
    SelfLoop(String),

    /// Text serialization format violation
    #[error("malformed graph input at line {line}: {reason}")]
    Malformed {
        /// 1-based line number
        line: usize,
        /// What was wrong with the line
        reason: String,
    },

    /// Underlying reader/writer failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl GraphError {
    pub(crate) fn malformed(line: usize, reason: impl Into<String>) -> Self {
        Self::Malformed {
            line,
            reason: reason.into(),
        }
    }

    /// Whether this error reports a missing vertex or edge
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::VertexNotFound(_) | Self::EdgeNotFound { .. })
    }
}
