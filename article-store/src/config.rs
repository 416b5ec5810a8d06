//! Runtime configuration for the article collection.

use crate::errors::RetrievalError;

/// Configuration for query-side retrieval.
#[derive(Clone, Debug)]
pub struct StoreConfig {
    /// Qdrant HTTP endpoint, e.g. `http://localhost:6334`.
    pub qdrant_url: String,
    /// Optional API key for Qdrant Cloud.
    pub qdrant_api_key: Option<String>,
    /// Target collection name.
    pub collection: String,
    /// Request timeout in seconds. An unreachable store fails the request
    /// after this long instead of hanging on transport defaults.
    pub timeout_secs: u64,
    /// Exact search flag (false = HNSW ANN).
    pub exact_search: bool,
}

impl StoreConfig {
    /// Creates a sane default config for a given Qdrant endpoint and collection name.
    pub fn new_default(url: impl Into<String>, collection: impl Into<String>) -> Self {
        Self {
            qdrant_url: url.into(),
            qdrant_api_key: None,
            collection: collection.into(),
            timeout_secs: 30,
            exact_search: false,
        }
    }

    /// Validates config values.
    pub fn validate(&self) -> Result<(), RetrievalError> {
        if self.qdrant_url.trim().is_empty() {
            return Err(RetrievalError::Config("qdrant_url is empty".into()));
        }
        if self.collection.trim().is_empty() {
            return Err(RetrievalError::Config("collection is empty".into()));
        }
        if self.timeout_secs == 0 {
            return Err(RetrievalError::Config("timeout_secs must be > 0".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let cfg = StoreConfig::new_default("http://localhost:6334", "articles");
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn empty_fields_are_rejected() {
        let mut cfg = StoreConfig::new_default("", "articles");
        assert!(cfg.validate().is_err());
        cfg = StoreConfig::new_default("http://localhost:6334", "  ");
        assert!(cfg.validate().is_err());
    }
}
