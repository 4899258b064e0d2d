//! Tests for the retrieval query path and prompt assembly.

mod common;

use std::sync::Arc;

use common::{DIM, FailingEmbedder, StubEmbedder, problem, two_problem_corpus};
use cp_rag::{
    KnowledgeBase, KnowledgeBaseBuilder, Problem, ProblemStore, RagError, RetrievalConfig,
    RetrievalHit, Retriever, VectorIndex, prompt,
};

fn test_config() -> RetrievalConfig {
    RetrievalConfig::builder().dimensions(DIM).build().unwrap()
}

async fn build_knowledge(problems: Vec<Problem>) -> Arc<KnowledgeBase> {
    let builder = KnowledgeBaseBuilder::new(Arc::new(StubEmbedder), test_config());
    let outcome = builder.build(problems.into_iter().map(Ok)).await.unwrap();
    assert!(outcome.failures.is_empty());
    Arc::new(outcome.knowledge)
}

#[tokio::test]
async fn single_document_is_returned_even_for_unrelated_query() {
    let kb = build_knowledge(vec![problem("p1", "Two Sum", "find pair summing to target")]).await;
    let retriever = Retriever::new(kb.clone(), Arc::new(StubEmbedder), test_config());

    let hits = retriever.retrieve_top_k("unrelated query", 3).await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, "p1");
    assert_eq!(&hits[0].problem, kb.store().get("p1").unwrap());
}

#[tokio::test]
async fn semantically_closer_problem_ranks_first() {
    let kb = build_knowledge(two_problem_corpus()).await;
    let retriever = Retriever::new(kb, Arc::new(StubEmbedder), test_config());

    let hits = retriever.retrieve("how to find shortest path in a graph").await.unwrap();
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].id, "p2");
    assert_eq!(hits[1].id, "p1");
    assert!(hits[0].score > hits[1].score);
}

#[tokio::test]
async fn results_never_exceed_k() {
    let kb = build_knowledge(vec![
        problem("p1", "Two Sum", "find pair summing to target"),
        problem("p2", "Graph BFS", "find shortest path"),
        problem("p3", "Three Sum", "find triple summing to target"),
    ])
    .await;
    let retriever = Retriever::new(kb, Arc::new(StubEmbedder), test_config());

    let hits = retriever.retrieve_top_k("sum of a pair", 2).await.unwrap();
    assert_eq!(hits.len(), 2);
    for window in hits.windows(2) {
        assert!(window[0].score >= window[1].score);
    }
}

#[tokio::test]
async fn empty_knowledge_base_yields_no_hits() {
    let kb = build_knowledge(Vec::new()).await;
    let retriever = Retriever::new(kb, Arc::new(StubEmbedder), test_config());

    let hits = retriever.retrieve("anything at all").await.unwrap();
    assert!(hits.is_empty());
}

#[tokio::test]
async fn query_embedding_failure_degrades_to_empty_result() {
    let kb = build_knowledge(two_problem_corpus()).await;
    let retriever = Retriever::new(kb, Arc::new(FailingEmbedder), test_config());

    // Non-fatal: the caller proceeds without retrieved context.
    let hits = retriever.retrieve("how to find shortest path").await.unwrap();
    assert!(hits.is_empty());
}

#[tokio::test]
async fn unresolvable_hit_surfaces_index_consistency() {
    // An indexed handle whose identifier never made it into the store:
    // the parallel-sequence invariant is broken, so retrieval must fail
    // loudly instead of emitting a partial result.
    let mut index = VectorIndex::new(DIM);
    index.add_all(vec![vec![1.0, 0.0, 0.0, 0.0]]).unwrap();
    let kb = KnowledgeBase::from_parts(ProblemStore::new(), index, vec!["p1".to_string()])
        .unwrap();

    let retriever = Retriever::new(Arc::new(kb), Arc::new(StubEmbedder), test_config());
    let err = retriever.retrieve("sum of a pair").await.unwrap_err();
    assert!(matches!(err, RagError::IndexConsistency { handle: 0, .. }));
}

#[test]
fn format_retrieved_renders_score_and_context_blocks() {
    let hits = vec![
        RetrievalHit {
            id: "p2".into(),
            score: 2.0,
            problem: problem("p2", "Graph BFS", "find shortest path"),
        },
        RetrievalHit {
            id: "p1".into(),
            score: 0.5,
            problem: problem("p1", "Two Sum", "find pair summing to target"),
        },
    ];

    let context = prompt::format_retrieved(&hits);
    assert!(context.starts_with("Relevant Problem p2 (score: 2.00):\n"));
    assert!(context.contains("Title: Graph BFS"));
    assert!(context.contains("Relevant Problem p1 (score: 0.50):\n"));
    assert!(context.contains("Statement: find pair summing to target"));
}

#[test]
fn format_retrieved_of_nothing_is_empty() {
    assert_eq!(prompt::format_retrieved(&[]), "");
}

#[test]
fn build_prompt_includes_current_context_only_when_present() {
    let with = prompt::build_prompt("how?", "Relevant Problem p1", Some("Title: Two Sum"));
    assert!(with.starts_with("User question: how?"));
    assert!(with.contains("Retrieved relevant information:\nRelevant Problem p1"));
    assert!(with.contains("Current Problem Context:\nTitle: Two Sum"));
    assert!(with.contains("competitive programming best practices"));

    let without = prompt::build_prompt("how?", "", None);
    assert!(!without.contains("Current Problem Context"));
}
