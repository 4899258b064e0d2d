//! In-memory vector index with exact inner-product search.

use tracing::debug;

use crate::error::{RagError, Result};

/// The reserved "no result at this rank" handle.
///
/// [`VectorIndex::search`] never emits it — results are trimmed to the number
/// of valid hits — but callers that consume raw handle slots (for example
/// from a backend that pads short result sets) must filter negative handles
/// before resolving them against the document store.
pub const NO_HANDLE: i64 = -1;

/// An append-only collection of fixed-dimension vectors supporting exact
/// top-k search by inner product.
///
/// A vector's position in insertion order is its handle; the knowledge base
/// keeps the parallel identifier sequence that maps handles back to document
/// identifiers. Search is a brute-force scan, O(n·D) per query, which is
/// exact and entirely adequate at corpus sizes of tens to low thousands of
/// documents. A production-scale deployment could substitute an approximate
/// index as long as the result set and ranking stay observably equivalent.
///
/// Scores are raw inner products: vectors are not normalized, so scores are
/// not bounded to [-1, 1] and are sensitive to vector magnitude. Callers
/// wanting cosine similarity should normalize their vectors before insertion
/// and search.
#[derive(Debug, Clone)]
pub struct VectorIndex {
    dimensions: usize,
    vectors: Vec<Vec<f32>>,
}

impl VectorIndex {
    /// Create an empty index holding vectors of the given dimensionality.
    pub fn new(dimensions: usize) -> Self {
        Self { dimensions, vectors: Vec::new() }
    }

    /// The dimensionality this index was constructed with.
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Number of stored vectors.
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    /// Whether the index holds no vectors.
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Append vectors in order; each vector's position becomes its handle.
    ///
    /// Not idempotent — repeated calls keep appending. The load is
    /// all-or-nothing: every vector is checked before any is inserted, so a
    /// rejected batch leaves the index unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::DimensionMismatch`] if any vector's length differs
    /// from the index dimensionality.
    pub fn add_all(&mut self, vectors: Vec<Vec<f32>>) -> Result<()> {
        for vector in &vectors {
            if vector.len() != self.dimensions {
                return Err(RagError::DimensionMismatch {
                    expected: self.dimensions,
                    actual: vector.len(),
                });
            }
        }
        let added = vectors.len();
        self.vectors.extend(vectors);
        debug!(added, total = self.vectors.len(), "loaded vectors into index");
        Ok(())
    }

    /// Search for the `k` most similar vectors to `query` by inner product.
    ///
    /// Returns `(handle, score)` pairs sorted by non-increasing score, ties
    /// broken by lower handle first. The result holds at most
    /// `min(k, len())` entries; an empty index yields an empty result, not
    /// an error.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::DimensionMismatch`] if the query vector's length
    /// differs from the index dimensionality.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<(i64, f32)>> {
        if query.len() != self.dimensions {
            return Err(RagError::DimensionMismatch {
                expected: self.dimensions,
                actual: query.len(),
            });
        }

        let mut scored: Vec<(i64, f32)> = self
            .vectors
            .iter()
            .enumerate()
            .map(|(handle, vector)| (handle as i64, dot(query, vector)))
            .collect();

        // Descending score; insertion order breaks ties for determinism.
        scored.sort_by(|a, b| {
            b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal).then(a.0.cmp(&b.0))
        });
        scored.truncate(k);
        Ok(scored)
    }
}

/// Inner product of two equal-length vectors.
fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}
