//! Configuration for the question-answering pipeline.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{RagError, Result};

/// Configuration parameters for [`MedicalRag`](crate::MedicalRag).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RagConfig {
    /// Number of top documents retrieved per query.
    pub top_k: usize,
    /// Maximum number of sources listed in a [`ChatResult`](crate::ChatResult).
    pub max_sources: usize,
    /// Length, in characters, of the context excerpt in fallback answers.
    pub fallback_excerpt_chars: usize,
    /// Upper bound on a single model call before falling back.
    pub model_timeout: Duration,
}

impl Default for RagConfig {
    fn default() -> Self {
        Self {
            top_k: 5,
            max_sources: 5,
            fallback_excerpt_chars: 500,
            model_timeout: Duration::from_secs(30),
        }
    }
}

impl RagConfig {
    /// Create a new builder for constructing a [`RagConfig`].
    pub fn builder() -> RagConfigBuilder {
        RagConfigBuilder::default()
    }
}

/// Builder for constructing a validated [`RagConfig`].
#[derive(Debug, Clone, Default)]
pub struct RagConfigBuilder {
    config: RagConfig,
}

impl RagConfigBuilder {
    /// Set the number of documents retrieved per query.
    pub fn top_k(mut self, k: usize) -> Self {
        self.config.top_k = k;
        self
    }

    /// Set the maximum number of sources returned with an answer.
    pub fn max_sources(mut self, n: usize) -> Self {
        self.config.max_sources = n;
        self
    }

    /// Set the fallback excerpt length in characters.
    pub fn fallback_excerpt_chars(mut self, n: usize) -> Self {
        self.config.fallback_excerpt_chars = n;
        self
    }

    /// Set the model call timeout.
    pub fn model_timeout(mut self, timeout: Duration) -> Self {
        self.config.model_timeout = timeout;
        self
    }

    /// Build the [`RagConfig`], validating that parameters are consistent.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::ConfigError`] if:
    /// - `top_k == 0`
    /// - `max_sources == 0`
    /// - `model_timeout` is zero
    pub fn build(self) -> Result<RagConfig> {
        if self.config.top_k == 0 {
            return Err(RagError::ConfigError("top_k must be greater than zero".to_string()));
        }
        if self.config.max_sources == 0 {
            return Err(RagError::ConfigError("max_sources must be greater than zero".to_string()));
        }
        if self.config.model_timeout.is_zero() {
            return Err(RagError::ConfigError("model_timeout must be non-zero".to_string()));
        }
        Ok(self.config)
    }
}
