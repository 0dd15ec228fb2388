//! Error types for the `medrag-model` crate.

use std::time::Duration;

use thiserror::Error;

/// Errors that can occur while calling a generative model.
#[derive(Debug, Error)]
pub enum ModelError {
    /// No API key was supplied or found in the environment.
    #[error("Missing credentials ({provider}): {message}")]
    MissingCredentials {
        /// The provider that needed credentials.
        provider: String,
        /// Which variables or arguments were checked.
        message: String,
    },

    /// The request could not be sent or its body could not be read.
    #[error("Request to {provider} failed: {message}")]
    Request {
        /// The provider that was being called.
        provider: String,
        /// A description of the transport failure.
        message: String,
    },

    /// The provider answered with a non-success status.
    #[error("{provider} API returned {status}: {message}")]
    Api {
        /// The provider that returned the error.
        provider: String,
        /// HTTP status code.
        status: u16,
        /// Error detail extracted from the response body.
        message: String,
    },

    /// The provider answered successfully but produced no text.
    #[error("{provider} returned no text: {reason}")]
    EmptyResponse {
        /// The provider that returned the empty answer.
        provider: String,
        /// Finish or block reason reported by the provider, if any.
        reason: String,
    },

    /// The call did not complete within the allowed time.
    #[error("Model call timed out after {0:?}")]
    Timeout(Duration),

    /// Invalid client configuration (bad URL, bad header value, ...).
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A convenience result type for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;
