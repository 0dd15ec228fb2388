//! Question-answering pipeline orchestrator.
//!
//! [`MedicalRag`] wires the corpus, the keyword scorer, the guarded
//! generator and the response assembler together:
//!
//! ```text
//! query ─▶ score_and_rank(corpus) ─▶ top-k ─▶ GuardedGenerator ─▶ answer
//!                                       │                            │
//!                                       └──────▶ assemble_response ◀─┘
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use medrag_rag::{Corpus, MedicalRag, RagConfig};
//!
//! let pipeline = MedicalRag::builder()
//!     .config(RagConfig::default())
//!     .corpus(Corpus::load_or_empty("data/medical_dataset.json"))
//!     .model(Arc::new(GeminiModel::from_env()?))
//!     .build()?;
//!
//! let result = pipeline.handle_query("I have a fever").await?;
//! ```

use std::sync::Arc;

use medrag_model::GenerativeModel;
use tracing::{info, instrument};

use crate::config::RagConfig;
use crate::corpus::Corpus;
use crate::document::Document;
use crate::error::{RagError, Result};
use crate::generator::GuardedGenerator;
use crate::request::ChatRequest;
use crate::response::{ChatResult, DocumentCatalog, HealthStatus, assemble_response};
use crate::retrieval::score_and_rank;

/// The medical question-answering pipeline.
///
/// Holds only read-only state, so one instance can serve concurrent
/// queries from behind an `Arc`. Construct one via
/// [`MedicalRag::builder()`].
#[derive(Debug)]
pub struct MedicalRag {
    config: RagConfig,
    corpus: Arc<Corpus>,
    generator: GuardedGenerator,
}

impl MedicalRag {
    /// Create a new [`MedicalRagBuilder`].
    pub fn builder() -> MedicalRagBuilder {
        MedicalRagBuilder::default()
    }

    /// Return a reference to the pipeline configuration.
    pub fn config(&self) -> &RagConfig {
        &self.config
    }

    /// Return a reference to the corpus.
    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    /// Retrieve the top documents for `query` without generating an answer.
    pub fn retrieve(&self, query: &str) -> Vec<&Document> {
        score_and_rank(query, self.corpus.documents(), self.config.top_k)
    }

    /// Answer `query`: retrieve → generate → assemble.
    ///
    /// Model and data problems degrade the answer but never fail the call.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::InvalidInput`] if `query` is empty or only
    /// whitespace.
    #[instrument(skip_all, fields(query_len = query.len()))]
    pub async fn handle_query(&self, query: &str) -> Result<ChatResult> {
        if query.trim().is_empty() {
            return Err(RagError::InvalidInput("no query provided".to_string()));
        }

        let documents = self.retrieve(query);
        let generated = self.generator.generate_with_origin(query, &documents).await;

        info!(
            document_count = documents.len(),
            origin = ?generated.origin,
            "query answered"
        );

        Ok(assemble_response(generated.answer, &documents, self.config.max_sources))
    }

    /// Answer a [`ChatRequest`], accepting either `query` or `message`.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::InvalidInput`] if the request carries no question.
    pub async fn handle_request(&self, request: &ChatRequest) -> Result<ChatResult> {
        let question = request
            .question()
            .ok_or_else(|| RagError::InvalidInput("no query provided".to_string()))?;
        self.handle_query(question).await
    }

    /// List every document in the corpus as `{id, title}`.
    pub fn catalog(&self) -> DocumentCatalog {
        DocumentCatalog { total: self.corpus.len(), documents: self.corpus.summaries() }
    }

    /// Report corpus size and whether a model is attached.
    pub fn health(&self) -> HealthStatus {
        HealthStatus {
            status: "healthy".to_string(),
            documents_loaded: self.corpus.len(),
            model_configured: self.generator.has_model(),
        }
    }
}

/// Builder for constructing a [`MedicalRag`].
///
/// `corpus` is required. `config` defaults to [`RagConfig::default()`];
/// without a `model` every answer with context uses the fallback template.
#[derive(Default)]
pub struct MedicalRagBuilder {
    config: Option<RagConfig>,
    corpus: Option<Arc<Corpus>>,
    model: Option<Arc<dyn GenerativeModel>>,
}

impl MedicalRagBuilder {
    /// Set the pipeline configuration.
    pub fn config(mut self, config: RagConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the corpus.
    pub fn corpus(mut self, corpus: impl Into<Arc<Corpus>>) -> Self {
        self.corpus = Some(corpus.into());
        self
    }

    /// Attach a generative model.
    pub fn model(mut self, model: Arc<dyn GenerativeModel>) -> Self {
        self.model = Some(model);
        self
    }

    /// Attach a generative model if one is available.
    pub fn maybe_model(mut self, model: Option<Arc<dyn GenerativeModel>>) -> Self {
        self.model = model;
        self
    }

    /// Build the [`MedicalRag`].
    ///
    /// # Errors
    ///
    /// Returns [`RagError::ConfigError`] if no corpus was set.
    pub fn build(self) -> Result<MedicalRag> {
        let corpus =
            self.corpus.ok_or_else(|| RagError::ConfigError("corpus is required".to_string()))?;
        let config = self.config.unwrap_or_default();
        let generator = GuardedGenerator::new(self.model, &config);

        Ok(MedicalRag { config, corpus, generator })
    }
}
