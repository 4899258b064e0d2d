//! Error types for the `cp-rag` crate.

use thiserror::Error;

/// Errors that can occur while building or querying the knowledge base.
///
/// The variants fall into two classes. `DocumentLoad` and `Embedding` are
/// expected runtime conditions: at build time they are recorded per document
/// and the build continues, and at query time an embedding failure degrades
/// retrieval to an empty result set. `DimensionMismatch` and
/// `IndexConsistency` are programming defects and must never be absorbed
/// silently.
#[derive(Debug, Error)]
pub enum RagError {
    /// A corpus record could not be loaded or rendered.
    #[error("Failed to load document '{id}': {message}")]
    DocumentLoad {
        /// Identifier of the document that failed.
        id: String,
        /// A description of the failure.
        message: String,
    },

    /// An error occurred during embedding generation.
    #[error("Embedding error ({provider}): {message}")]
    Embedding {
        /// The embedding backend that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },

    /// A vector of the wrong length was submitted to the index.
    ///
    /// Rejected before insertion; the index is left unchanged.
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// The dimensionality the index was constructed with.
        expected: usize,
        /// The dimensionality of the offending vector.
        actual: usize,
    },

    /// A search hit could not be resolved back to a stored document.
    ///
    /// Indicates the identifier and vector sequences went out of step, which
    /// corrupts every future retrieval. This must surface to the caller.
    #[error("Index inconsistency: handle {handle} has no identifier ({entries} entries)")]
    IndexConsistency {
        /// The handle that failed to resolve.
        handle: i64,
        /// The number of identifiers recorded at build time.
        entries: usize,
    },

    /// A configuration validation error.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A convenience result type for retrieval operations.
pub type Result<T> = std::result::Result<T, RagError>;
