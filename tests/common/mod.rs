//! Shared test fixtures: deterministic stub embedders and problem builders.
#![allow(dead_code)]

use async_trait::async_trait;
use cp_rag::{Embedder, Problem, RagError, Result};

/// Embedding dimensionality used across the test suite.
pub const DIM: usize = 4;

/// Keyword axes for the stub embedder, one vector component each.
const KEYWORDS: [&str; 4] = ["sum", "pair", "graph", "path"];

/// A deterministic embedder mapping text to keyword-occurrence counts.
///
/// Component `i` of the output is the number of occurrences of `KEYWORDS[i]`
/// in the lowercased input, so dot products between test texts are known in
/// advance and every call is reproducible.
pub struct StubEmbedder;

#[async_trait]
impl Embedder for StubEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let lower = text.to_lowercase();
        Ok(KEYWORDS.iter().map(|kw| lower.matches(kw).count() as f32).collect())
    }

    fn dimensions(&self) -> usize {
        DIM
    }
}

/// An embedder that fails on inputs containing the marker `"poison"` and
/// otherwise behaves like [`StubEmbedder`].
pub struct PoisonEmbedder;

#[async_trait]
impl Embedder for PoisonEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        if text.contains("poison") {
            return Err(RagError::Embedding {
                provider: "Poison".into(),
                message: "refusing poisoned input".into(),
            });
        }
        StubEmbedder.embed(text).await
    }

    fn dimensions(&self) -> usize {
        DIM
    }
}

/// An embedder that always fails.
pub struct FailingEmbedder;

#[async_trait]
impl Embedder for FailingEmbedder {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
        Err(RagError::Embedding {
            provider: "Failing".into(),
            message: "backend unavailable".into(),
        })
    }

    fn dimensions(&self) -> usize {
        DIM
    }
}

/// Build a problem with a title and statement.
pub fn problem(id: &str, title: &str, statement: &str) -> Problem {
    let mut p = Problem::new(id);
    p.title = Some(title.to_string());
    p.statement = Some(statement.to_string());
    p
}

/// The two-problem fixture: "Two Sum" and "Graph BFS".
pub fn two_problem_corpus() -> Vec<Problem> {
    vec![
        problem("p1", "Two Sum", "find pair summing to target"),
        problem("p2", "Graph BFS", "find shortest path"),
    ]
}
