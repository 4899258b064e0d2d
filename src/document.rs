//! Data types for problems, the problem store, and retrieval results.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A competitive-programming problem loaded from the corpus.
///
/// All structured fields are optional; a missing field renders as an empty
/// string in the canonical context. Problems are immutable once loaded and
/// owned exclusively by the [`ProblemStore`] — the index and retriever refer
/// to them by identifier only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Problem {
    /// Unique identifier for the problem.
    pub id: String,
    /// The problem title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// The problem statement.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statement: Option<String>,
    /// The input format specification.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_spec: Option<String>,
    /// The output format specification.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_spec: Option<String>,
    /// A reference solution.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solution: Option<String>,
}

impl Problem {
    /// Create a problem with the given identifier and no structured fields.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: None,
            statement: None,
            input_spec: None,
            output_spec: None,
            solution: None,
        }
    }

    /// Render the canonical textual context for this problem.
    ///
    /// Fields are concatenated in a fixed order with fixed labels. This
    /// rendering is what gets embedded at build time; queries are embedded
    /// raw and never pass through it.
    pub fn context(&self) -> String {
        fn field(f: &Option<String>) -> &str {
            f.as_deref().unwrap_or("")
        }
        format!(
            "Title: {}\nStatement: {}\nInput: {}\nOutput: {}\nSolution: {}",
            field(&self.title),
            field(&self.statement),
            field(&self.input_spec),
            field(&self.output_spec),
            field(&self.solution),
        )
    }
}

/// The document store: a mapping from problem identifier to problem content.
///
/// Populated once during knowledge-base construction and read-only for the
/// rest of the process lifetime.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProblemStore {
    problems: HashMap<String, Problem>,
}

impl ProblemStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a problem, keyed by its identifier.
    pub fn insert(&mut self, problem: Problem) {
        self.problems.insert(problem.id.clone(), problem);
    }

    /// Look up a problem by identifier.
    pub fn get(&self, id: &str) -> Option<&Problem> {
        self.problems.get(id)
    }

    /// Number of stored problems.
    pub fn len(&self) -> usize {
        self.problems.len()
    }

    /// Whether the store holds no problems.
    pub fn is_empty(&self) -> bool {
        self.problems.is_empty()
    }

    /// Iterate over stored problem identifiers (arbitrary order).
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.problems.keys().map(String::as_str)
    }
}

/// A retrieved problem paired with its similarity score.
///
/// Emitted by the retriever in descending score order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalHit {
    /// Identifier of the retrieved problem.
    pub id: String,
    /// Inner-product similarity score (higher is more relevant).
    pub score: f32,
    /// The retrieved problem content.
    pub problem: Problem,
}
