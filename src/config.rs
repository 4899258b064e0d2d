//! Configuration for knowledge-base construction and retrieval.

use serde::{Deserialize, Serialize};

use crate::error::{RagError, Result};

/// Configuration parameters shared by the builder and the retriever.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RetrievalConfig {
    /// Dimensionality of the embedding vectors held by the index.
    pub dimensions: usize,
    /// Number of top results to return from a retrieval query.
    pub top_k: usize,
    /// Maximum number of characters fed to the embedder per input.
    ///
    /// Longer inputs are truncated so every embedding call is bounded and
    /// the output shape stays fixed regardless of document length.
    pub max_embed_chars: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self { dimensions: 768, top_k: 3, max_embed_chars: 2048 }
    }
}

impl RetrievalConfig {
    /// Create a new builder for constructing a [`RetrievalConfig`].
    pub fn builder() -> RetrievalConfigBuilder {
        RetrievalConfigBuilder::default()
    }
}

/// Builder for constructing a validated [`RetrievalConfig`].
#[derive(Debug, Clone, Default)]
pub struct RetrievalConfigBuilder {
    config: RetrievalConfig,
}

impl RetrievalConfigBuilder {
    /// Set the embedding dimensionality.
    pub fn dimensions(mut self, dimensions: usize) -> Self {
        self.config.dimensions = dimensions;
        self
    }

    /// Set the number of top results returned per query.
    pub fn top_k(mut self, k: usize) -> Self {
        self.config.top_k = k;
        self
    }

    /// Set the per-input character budget for embedding calls.
    pub fn max_embed_chars(mut self, max: usize) -> Self {
        self.config.max_embed_chars = max;
        self
    }

    /// Build the [`RetrievalConfig`], validating that parameters are consistent.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Config`] if:
    /// - `dimensions == 0`
    /// - `top_k == 0`
    /// - `max_embed_chars == 0`
    pub fn build(self) -> Result<RetrievalConfig> {
        if self.config.dimensions == 0 {
            return Err(RagError::Config("dimensions must be greater than zero".to_string()));
        }
        if self.config.top_k == 0 {
            return Err(RagError::Config("top_k must be greater than zero".to_string()));
        }
        if self.config.max_embed_chars == 0 {
            return Err(RagError::Config(
                "max_embed_chars must be greater than zero".to_string(),
            ));
        }
        Ok(self.config)
    }
}
