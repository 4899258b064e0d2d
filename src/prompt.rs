//! Assembly of retrieved context into a downstream generation prompt.
//!
//! The generation call itself is an external collaborator; this module only
//! produces the text handed to it.

use std::fmt::Write;

use crate::document::RetrievalHit;

/// Format retrieval hits as a context bundle for the generation prompt.
///
/// Each hit becomes a `Relevant Problem` block with its similarity score and
/// canonical problem context. An empty hit list yields an empty string.
pub fn format_retrieved(hits: &[RetrievalHit]) -> String {
    let mut out = String::new();
    for (i, hit) in hits.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let _ = write!(
            out,
            "Relevant Problem {} (score: {:.2}):\n{}",
            hit.id,
            hit.score,
            hit.problem.context()
        );
    }
    out
}

/// Build the final generation prompt from the user question, the retrieved
/// context bundle, and an optional current-problem context.
pub fn build_prompt(
    user_input: &str,
    retrieved_context: &str,
    current_context: Option<&str>,
) -> String {
    let current = match current_context {
        Some(ctx) => format!("\nCurrent Problem Context:\n{ctx}"),
        None => String::new(),
    };
    format!(
        "User question: {user_input}\n\n\
         Retrieved relevant information:\n{retrieved_context}\n\
         {current}\n\n\
         Provide a detailed response that:\n\
         1. Directly addresses the user's question\n\
         2. References relevant information from similar problems when helpful\n\
         3. Maintains focus on competitive programming best practices"
    )
}
