//! The inbound chat request.

use serde::{Deserialize, Serialize};

/// A question as submitted by a client.
///
/// Older clients send the question as `message` instead of `query`; both
/// are accepted. `conversation_history` is accepted for compatibility and
/// ignored: every query is answered independently.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ChatRequest {
    /// The question.
    pub query: Option<String>,
    /// Legacy name for the question.
    pub message: Option<String>,
    /// Prior turns; not used for answering.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub conversation_history: Vec<serde_json::Value>,
}

impl ChatRequest {
    /// A request carrying `query`.
    pub fn new(query: impl Into<String>) -> Self {
        Self { query: Some(query.into()), ..Self::default() }
    }

    /// The first non-empty of `query` and `message`.
    pub fn question(&self) -> Option<&str> {
        [self.query.as_deref(), self.message.as_deref()]
            .into_iter()
            .flatten()
            .find(|q| !q.is_empty())
    }
}
