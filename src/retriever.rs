//! The retrieval query path: embed, search, resolve, assemble.

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::config::RetrievalConfig;
use crate::document::RetrievalHit;
use crate::embedding::Embedder;
use crate::error::{RagError, Result};
use crate::index::NO_HANDLE;
use crate::knowledge::KnowledgeBase;

/// Serves ranked retrieval queries against a built [`KnowledgeBase`].
///
/// Queries are embedded raw — the canonical document context template is
/// never applied to query text. Embedding failures are absorbed into an
/// empty result set so the conversational layer can proceed unaugmented;
/// dimension and consistency defects propagate as errors.
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use cp_rag::{Retriever, RetrievalConfig};
///
/// let retriever = Retriever::new(Arc::new(knowledge), Arc::new(embedder), config);
/// let hits = retriever.retrieve("how to find shortest path in a graph").await?;
/// for hit in &hits {
///     println!("{} ({:.2})", hit.id, hit.score);
/// }
/// ```
pub struct Retriever {
    knowledge: Arc<KnowledgeBase>,
    embedder: Arc<dyn Embedder>,
    config: RetrievalConfig,
}

impl Retriever {
    /// Create a retriever over the given knowledge base.
    pub fn new(
        knowledge: Arc<KnowledgeBase>,
        embedder: Arc<dyn Embedder>,
        config: RetrievalConfig,
    ) -> Self {
        Self { knowledge, embedder, config }
    }

    /// The knowledge base this retriever serves.
    pub fn knowledge(&self) -> &Arc<KnowledgeBase> {
        &self.knowledge
    }

    /// Retrieve the configured number of most similar problems.
    pub async fn retrieve(&self, query: &str) -> Result<Vec<RetrievalHit>> {
        self.retrieve_top_k(query, self.config.top_k).await
    }

    /// Retrieve the `k` most similar problems for a free-text query.
    ///
    /// Returns hits in descending score order, at most `min(k, indexed)`
    /// of them. An embedding failure yields an empty result set with a
    /// logged diagnostic rather than an error.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::DimensionMismatch`] if the embedder produced a
    /// query vector of the wrong length, and [`RagError::IndexConsistency`]
    /// if a search hit cannot be resolved back to a stored problem. Both
    /// indicate defects, not runtime conditions, and are never swallowed.
    pub async fn retrieve_top_k(&self, query: &str, k: usize) -> Result<Vec<RetrievalHit>> {
        let query_vector = match self.embedder.embed(query).await {
            Ok(vector) => vector,
            Err(e) => {
                warn!(error = %e, "query embedding failed, returning no context");
                return Ok(Vec::new());
            }
        };

        let scored = self.knowledge.index().search(&query_vector, k)?;

        let mut hits = Vec::with_capacity(scored.len());
        for (handle, score) in scored {
            // NO_HANDLE and any other negative slot carries no result.
            if handle <= NO_HANDLE {
                continue;
            }
            let id = self.knowledge.resolve(handle).ok_or_else(|| {
                error!(handle, entries = self.knowledge.len(), "unresolvable search hit");
                RagError::IndexConsistency { handle, entries: self.knowledge.len() }
            })?;
            let problem = self.knowledge.store().get(id).ok_or_else(|| {
                error!(handle, id, "indexed identifier missing from store");
                RagError::IndexConsistency { handle, entries: self.knowledge.len() }
            })?;
            hits.push(RetrievalHit { id: id.to_string(), score, problem: problem.clone() });
        }

        info!(result_count = hits.len(), k, "retrieval completed");
        Ok(hits)
    }
}
