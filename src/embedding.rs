//! Embedder trait: the text-to-vector boundary.

use async_trait::async_trait;

use crate::error::Result;

/// A capability that converts text into a fixed-length dense vector.
///
/// Implementations wrap specific embedding backends behind a unified async
/// interface. Every call must return a vector of exactly
/// [`dimensions()`](Embedder::dimensions) elements regardless of input
/// length, and must be deterministic for a fixed model state. Implementations
/// must not expose mutable state between calls.
///
/// Errors from `embed` are not part of normal control flow: during
/// knowledge-base construction a failing document is skipped and recorded,
/// and during a query the retriever degrades to an empty result set.
///
/// # Example
///
/// ```rust,ignore
/// use cp_rag::Embedder;
///
/// let embedder = MyEmbedder::new();
/// let vector = embedder.embed("find shortest path").await?;
/// assert_eq!(vector.len(), embedder.dimensions());
/// ```
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Generate an embedding vector for a single text input.
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Return the dimensionality of vectors produced by this embedder.
    fn dimensions(&self) -> usize;
}

/// Truncate `text` to at most `max_chars` characters, on a UTF-8 boundary.
///
/// Backends apply this before sending input so that every embedding call is
/// bounded. Returns the input unchanged when it already fits.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}
