//! Error types for the `medrag-rag` crate.

use thiserror::Error;

/// Errors that can occur in the question-answering pipeline.
///
/// Only [`RagError::InvalidInput`] is returned by
/// [`MedicalRag::handle_query`](crate::MedicalRag::handle_query). The other
/// failure kinds are recovered inside the pipeline and degrade to a still
/// valid answer.
#[derive(Debug, Error)]
pub enum RagError {
    /// The query was empty or missing.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The generative model could not produce an answer.
    #[error("Model unavailable: {0}")]
    ModelUnavailable(#[from] medrag_model::ModelError),

    /// The corpus could not be loaded.
    #[error("Data unavailable ({path}): {message}")]
    DataUnavailable {
        /// The dataset location that failed.
        path: String,
        /// A description of the failure.
        message: String,
    },

    /// A configuration validation error.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// A convenience result type for pipeline operations.
pub type Result<T> = std::result::Result<T, RagError>;
