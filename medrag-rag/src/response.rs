//! Caller-facing result types.

use serde::{Deserialize, Serialize};

use crate::document::{Document, SourceRef};

/// Upper bound on the number of sources returned with an answer.
pub const MAX_SOURCES: usize = 5;

/// The answer to one query and the documents it drew on.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatResult {
    /// The answer text.
    pub answer: String,
    /// Up to `max_sources` retrieved documents, best first.
    pub sources: Vec<SourceRef>,
}

/// Package `answer` with at most `max_sources` source references.
///
/// `max_sources` is itself capped at [`MAX_SOURCES`].
pub fn assemble_response(
    answer: String,
    documents: &[&Document],
    max_sources: usize,
) -> ChatResult {
    let sources = documents
        .iter()
        .take(max_sources.min(MAX_SOURCES))
        .map(|doc| doc.source_ref())
        .collect();
    ChatResult { answer, sources }
}

/// Every document in the corpus, reduced to `{id, title}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DocumentCatalog {
    /// Number of documents in the corpus.
    pub total: usize,
    /// The documents in corpus order.
    pub documents: Vec<SourceRef>,
}

/// Liveness summary of a pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthStatus {
    /// Always `"healthy"`: the pipeline degrades instead of failing.
    pub status: String,
    /// Number of documents in the corpus.
    pub documents_loaded: usize,
    /// Whether a generative model is attached.
    pub model_configured: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs(n: usize) -> Vec<Document> {
        (0..n)
            .map(|i| Document::new(format!("d{i}"), format!("Title {i}"), "body", ["kw"]))
            .collect()
    }

    #[test]
    fn keeps_order_and_reduces_to_id_and_title() {
        let docs = docs(2);
        let refs: Vec<&Document> = docs.iter().collect();
        let result = assemble_response("answer".into(), &refs, 5);
        assert_eq!(result.answer, "answer");
        assert_eq!(
            result.sources,
            vec![
                SourceRef { id: "d0".into(), title: "Title 0".into() },
                SourceRef { id: "d1".into(), title: "Title 1".into() },
            ]
        );
    }

    #[test]
    fn never_more_than_five_sources() {
        let docs = docs(20);
        let refs: Vec<&Document> = docs.iter().collect();
        assert_eq!(assemble_response(String::new(), &refs, 20).sources.len(), MAX_SOURCES);
        assert_eq!(assemble_response(String::new(), &refs, 3).sources.len(), 3);
    }

    #[test]
    fn serializes_answer_and_sources() {
        let result = ChatResult {
            answer: "a".into(),
            sources: vec![SourceRef { id: "d1".into(), title: "Flu".into() }],
        };
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            serde_json::json!({"answer": "a", "sources": [{"id": "d1", "title": "Flu"}]})
        );
    }
}
