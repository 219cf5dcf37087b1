//! Store configuration
//!
//! Replaces a process-wide debug switch with a value owned by each store.

use serde::{Deserialize, Serialize};

/// Default upper bound on vertex key length, in bytes
pub const MAX_VERTEX_KEY_LEN: usize = 256;

/// How much the store reports through `tracing` on its own initiative
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    /// Never log validator findings
    Quiet,
    /// Log one summary line when the validator finds violations
    #[default]
    Normal,
    /// Log every validator finding individually
    Noisy,
}

/// Per-store configuration
///
/// # Example
///
/// ```
/// use trueno_graphdb::{GraphStore, StoreConfig, Verbosity};
///
/// let config = StoreConfig::default()
///     .with_max_key_len(32)
///     .with_verbosity(Verbosity::Noisy);
/// let store = GraphStore::with_config(false, config);
/// assert_eq!(store.config().max_key_len, 32);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Maximum vertex key length in bytes
    pub max_key_len: usize,
    /// Validator reporting level
    pub verbosity: Verbosity,
}

impl StoreConfig {
    /// Set the maximum vertex key length
    #[must_use]
    pub const fn with_max_key_len(mut self, max_key_len: usize) -> Self {
        self.max_key_len = max_key_len;
        self
    }

    /// Set the validator reporting level
    #[must_use]
    pub const fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            max_key_len: MAX_VERTEX_KEY_LEN,
            verbosity: Verbosity::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StoreConfig::default();
        assert_eq!(config.max_key_len, 256);
        assert_eq!(config.verbosity, Verbosity::Normal);
    }

    #[test]
    fn test_builder() {
        let config = StoreConfig::default()
            .with_max_key_len(8)
            .with_verbosity(Verbosity::Quiet);
        assert_eq!(config.max_key_len, 8);
        assert_eq!(config.verbosity, Verbosity::Quiet);
    }
}
