//! Data types for medical documents and the source references returned
//! alongside answers.

use serde::{Deserialize, Serialize};

/// A medical reference document.
///
/// Dataset records are permissive: any missing field deserialises to an
/// empty value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Document {
    /// Identifier of the document. Not guaranteed unique across a corpus.
    pub id: String,
    /// Human-readable title, e.g. the condition name.
    pub title: String,
    /// Free-text body.
    pub content: String,
    /// Keyword tags, in dataset order.
    pub keywords: Vec<String>,
}

impl Document {
    /// Create a document.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
        keywords: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            content: content.into(),
            keywords: keywords.into_iter().map(Into::into).collect(),
        }
    }

    /// The `{id, title}` summary shown to callers.
    pub fn source_ref(&self) -> SourceRef {
        SourceRef { id: self.id.clone(), title: self.title.clone() }
    }
}

/// A reference to a [`Document`] reduced to its id and title.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SourceRef {
    /// The document id.
    pub id: String,
    /// The document title.
    pub title: String,
}
