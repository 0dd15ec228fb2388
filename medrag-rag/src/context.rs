//! Grounding context assembly.

use crate::document::Document;

/// Separator placed between consecutive documents in the context.
pub const DOCUMENT_SEPARATOR: &str = "\n\n";

/// The text block a model answer is grounded on.
///
/// `NoContext` is distinct from a context whose documents happen to have
/// empty titles and content: the former means retrieval found nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationContext {
    /// Retrieval returned no documents.
    NoContext,
    /// `**{title}**\n{content}` per document, joined by a blank line.
    Text(String),
}

impl GenerationContext {
    /// Build the context for `documents`, preserving their order.
    pub fn assemble(documents: &[&Document]) -> Self {
        if documents.is_empty() {
            return Self::NoContext;
        }

        let text = documents
            .iter()
            .map(|doc| format!("**{}**\n{}", doc.title, doc.content))
            .collect::<Vec<_>>()
            .join(DOCUMENT_SEPARATOR);
        Self::Text(text)
    }

    /// The assembled text, or `None` when nothing was retrieved.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::NoContext => None,
            Self::Text(text) => Some(text),
        }
    }

    /// Whether retrieval found nothing.
    pub fn is_no_context(&self) -> bool {
        matches!(self, Self::NoContext)
    }

    /// The first `max_chars` characters of the text.
    ///
    /// Cuts on character boundaries, never inside a UTF-8 sequence.
    pub fn excerpt(&self, max_chars: usize) -> String {
        self.as_text().map(|text| text.chars().take(max_chars).collect()).unwrap_or_default()
    }
}
