//! Knowledge-base construction: document store + vector index in one pass.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::RetrievalConfig;
use crate::document::{Problem, ProblemStore};
use crate::embedding::{Embedder, truncate_chars};
use crate::error::{RagError, Result};
use crate::index::VectorIndex;

/// A corpus record that failed to load or embed during the build.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoadFailure {
    /// Identifier of the failed record.
    pub id: String,
    /// Why the record was skipped.
    pub reason: String,
}

impl LoadFailure {
    /// Create a new load failure record.
    pub fn new(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self { id: id.into(), reason: reason.into() }
    }
}

/// The immutable aggregate of document store and vector index.
///
/// Produced by one [`KnowledgeBaseBuilder::build`] pass and read-only for the
/// rest of the process lifetime. No update or delete operations exist —
/// changing the corpus means rebuilding the whole structure. Queries are
/// independent read-only operations, so no locking is needed after build.
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    store: ProblemStore,
    index: VectorIndex,
    /// Insertion-order identifiers; position `h` maps index handle `h` back
    /// to its document. Always the same length as the index.
    handles: Vec<String>,
}

impl KnowledgeBase {
    /// Assemble a knowledge base from its parts, validating the
    /// handle-to-identifier correspondence.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::IndexConsistency`] if the identifier sequence and
    /// the index disagree on length — the parallel-sequence invariant is the
    /// only thing tying a search hit to a document, so a mismatch here would
    /// corrupt every future retrieval.
    pub fn from_parts(
        store: ProblemStore,
        index: VectorIndex,
        handles: Vec<String>,
    ) -> Result<Self> {
        if handles.len() != index.len() {
            return Err(RagError::IndexConsistency {
                handle: index.len() as i64,
                entries: handles.len(),
            });
        }
        Ok(Self { store, index, handles })
    }

    /// The document store.
    pub fn store(&self) -> &ProblemStore {
        &self.store
    }

    /// The vector index.
    pub fn index(&self) -> &VectorIndex {
        &self.index
    }

    /// The insertion-order identifier sequence.
    pub fn handles(&self) -> &[String] {
        &self.handles
    }

    /// Number of indexed documents.
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// Whether no documents were indexed.
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Resolve an index handle to its document identifier.
    ///
    /// Negative (sentinel) handles and handles past the end resolve to
    /// `None`; the caller decides whether that is a filtered sentinel or a
    /// consistency defect.
    pub fn resolve(&self, handle: i64) -> Option<&str> {
        usize::try_from(handle).ok().and_then(|h| self.handles.get(h)).map(String::as_str)
    }
}

/// The outcome of one build pass: the knowledge base plus the records that
/// were skipped along the way.
#[derive(Debug)]
pub struct BuildOutcome {
    /// The built, immutable knowledge base.
    pub knowledge: KnowledgeBase,
    /// Per-record failures, in enumeration order.
    pub failures: Vec<LoadFailure>,
}

/// Builds a [`KnowledgeBase`] from an enumerable corpus.
///
/// The build is best-effort: a single record's failure — whether the corpus
/// source could not produce it or the embedder rejected it — is recorded and
/// skipped, never aborting the pass.
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use cp_rag::{KnowledgeBaseBuilder, RetrievalConfig};
///
/// let builder = KnowledgeBaseBuilder::new(Arc::new(embedder), RetrievalConfig::default());
/// let outcome = builder.build(corpus.records()).await?;
/// println!("indexed {} problems", outcome.knowledge.len());
/// ```
pub struct KnowledgeBaseBuilder {
    embedder: Arc<dyn Embedder>,
    config: RetrievalConfig,
}

impl KnowledgeBaseBuilder {
    /// Create a builder using the given embedder and configuration.
    pub fn new(embedder: Arc<dyn Embedder>, config: RetrievalConfig) -> Self {
        Self { embedder, config }
    }

    /// Run one build pass over the corpus records.
    ///
    /// Records are visited in the enumeration order of the corpus source
    /// (not guaranteed stable across runs). For each `Ok` record the
    /// canonical problem context is rendered and embedded; the identifier
    /// and vector are appended together, so the parallel sequences can never
    /// go out of step. Accumulated vectors are bulk-loaded into the index in
    /// one operation after the full pass; an empty accumulation leaves the
    /// index empty.
    ///
    /// # Errors
    ///
    /// Per-record failures never abort the build. Returns
    /// [`RagError::DimensionMismatch`] if the embedder produced vectors that
    /// do not match the configured dimensionality — a defect, not a skip.
    pub async fn build<I>(&self, records: I) -> Result<BuildOutcome>
    where
        I: IntoIterator<Item = std::result::Result<Problem, LoadFailure>>,
    {
        let mut store = ProblemStore::new();
        let mut identifiers: Vec<String> = Vec::new();
        let mut vectors: Vec<Vec<f32>> = Vec::new();
        let mut failures: Vec<LoadFailure> = Vec::new();

        for record in records {
            let problem = match record {
                Ok(problem) => problem,
                Err(failure) => {
                    warn!(id = %failure.id, reason = %failure.reason, "skipping corpus record");
                    failures.push(failure);
                    continue;
                }
            };

            let context = problem.context();
            let bounded = truncate_chars(&context, self.config.max_embed_chars);
            match self.embedder.embed(bounded).await {
                Ok(vector) => {
                    // Appended together: one failure aborts both.
                    identifiers.push(problem.id.clone());
                    vectors.push(vector);
                    store.insert(problem);
                }
                Err(e) => {
                    warn!(id = %problem.id, error = %e, "skipping document, embedding failed");
                    failures.push(LoadFailure::new(problem.id, e.to_string()));
                }
            }
        }

        let mut index = VectorIndex::new(self.config.dimensions);
        if !vectors.is_empty() {
            index.add_all(vectors)?;
        }

        info!(
            indexed = identifiers.len(),
            failed = failures.len(),
            "knowledge base built"
        );

        let knowledge = KnowledgeBase::from_parts(store, index, identifiers)?;
        Ok(BuildOutcome { knowledge, failures })
    }
}
