//! # cp-rag
//!
//! Retrieval-augmented context engine over a fixed corpus of
//! competitive-programming problems.
//!
//! The crate builds an immutable knowledge base — a document store plus an
//! exact inner-product vector index — in one best-effort pass, then serves
//! ranked top-k retrieval queries against it. Retrieved problems are
//! assembled into a context bundle for a downstream generation component.
//!
//! ## Architecture
//!
//! ```text
//! corpus records ──> KnowledgeBaseBuilder ──> KnowledgeBase
//!                      │                        ├── ProblemStore (id → Problem)
//!                      └── Embedder             └── VectorIndex  (handle → vector)
//!
//! query text ──> Retriever ──> Vec<RetrievalHit> ──> prompt::format_retrieved
//! ```
//!
//! The [`Embedder`] is an opaque capability (text → fixed-length vector);
//! swapping backends never changes the index or retriever contracts. The
//! knowledge base follows a two-phase lifecycle: build once, then read-only
//! for the process lifetime.
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use cp_rag::{KnowledgeBaseBuilder, Retriever, RetrievalConfig};
//!
//! let config = RetrievalConfig::default();
//! let builder = KnowledgeBaseBuilder::new(embedder.clone(), config.clone());
//! let outcome = builder.build(corpus_records).await?;
//!
//! let retriever = Retriever::new(Arc::new(outcome.knowledge), embedder, config);
//! let hits = retriever.retrieve("how to find shortest path in a graph").await?;
//! let context = cp_rag::prompt::format_retrieved(&hits);
//! ```

pub mod config;
pub mod document;
pub mod embedding;
pub mod error;
pub mod index;
pub mod knowledge;
pub mod prompt;
pub mod retriever;

#[cfg(feature = "openai")]
pub mod openai;

pub use config::{RetrievalConfig, RetrievalConfigBuilder};
pub use document::{Problem, ProblemStore, RetrievalHit};
pub use embedding::{Embedder, truncate_chars};
pub use error::{RagError, Result};
pub use index::{NO_HANDLE, VectorIndex};
pub use knowledge::{BuildOutcome, KnowledgeBase, KnowledgeBaseBuilder, LoadFailure};
pub use retriever::Retriever;

#[cfg(feature = "openai")]
pub use openai::OpenAiEmbedder;
