//! The read-only document corpus and its loader.
//!
//! A [`Corpus`] is loaded once and then shared (usually behind an `Arc`)
//! by every query. It is never mutated after construction, so concurrent
//! readers need no locking.

use std::path::Path;

use tracing::{info, warn};

use crate::document::{Document, SourceRef};
use crate::error::{RagError, Result};

/// An ordered, immutable collection of [`Document`]s.
///
/// Duplicate ids are kept as distinct entries in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Corpus {
    documents: Vec<Document>,
}

impl Corpus {
    /// Build a corpus from documents, keeping their order.
    pub fn new(documents: Vec<Document>) -> Self {
        Self { documents }
    }

    /// An empty corpus. Every query against it finds nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse a corpus from a JSON array of document records.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::DataUnavailable`] if the text is not a JSON array
    /// of objects.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let documents: Vec<Document> = serde_json::from_str(json).map_err(|e| {
            RagError::DataUnavailable { path: "<inline>".into(), message: e.to_string() }
        })?;
        Ok(Self::new(documents))
    }

    /// Load a corpus from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::DataUnavailable`] if the file cannot be read or
    /// parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data_unavailable = |message: String| RagError::DataUnavailable {
            path: path.display().to_string(),
            message,
        };

        let text = std::fs::read_to_string(path).map_err(|e| data_unavailable(e.to_string()))?;
        let documents: Vec<Document> =
            serde_json::from_str(&text).map_err(|e| data_unavailable(e.to_string()))?;

        info!(path = %path.display(), document_count = documents.len(), "loaded corpus");
        Ok(Self::new(documents))
    }

    /// Load a corpus, degrading to an empty one if loading fails.
    ///
    /// The failure is logged; callers still get a working (if empty)
    /// corpus.
    pub fn load_or_empty(path: impl AsRef<Path>) -> Self {
        Self::load(path).unwrap_or_else(|e| {
            warn!(error = %e, "corpus unavailable, continuing with an empty corpus");
            Self::empty()
        })
    }

    /// The documents in corpus order.
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// Number of documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether the corpus holds no documents.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// `{id, title}` for every document, in corpus order.
    pub fn summaries(&self) -> Vec<SourceRef> {
        self.documents.iter().map(Document::source_ref).collect()
    }
}

impl From<Vec<Document>> for Corpus {
    fn from(documents: Vec<Document>) -> Self {
        Self::new(documents)
    }
}
