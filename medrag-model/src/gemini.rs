//! Gemini model client over the Generative Language REST API.
//!
//! This module is only available when the `gemini` feature is enabled.

use std::sync::LazyLock;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};
use url::Url;

use crate::error::{ModelError, Result};
use crate::model::GenerativeModel;

const PROVIDER: &str = "Gemini";

/// The default model used when none is configured.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

static DEFAULT_BASE_URL: LazyLock<Url> = LazyLock::new(|| {
    Url::parse("https://generativelanguage.googleapis.com/v1beta/")
        .expect("unreachable error: failed to parse default base URL")
});

/// Connection settings for [`GeminiModel`].
#[derive(Clone)]
pub struct GeminiConfig {
    api_key: String,
    model: String,
    base_url: Url,
}

impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url.as_str())
            .finish()
    }
}

impl GeminiConfig {
    /// Create a config for the default model.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::MissingCredentials`] if `api_key` is blank.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ModelError::MissingCredentials {
                provider: PROVIDER.into(),
                message: "API key must not be empty".into(),
            });
        }
        Ok(Self { api_key, model: DEFAULT_MODEL.into(), base_url: DEFAULT_BASE_URL.clone() })
    }

    /// Read the API key from `GEMINI_API_KEY`, then `GOOGLE_API_KEY`.
    ///
    /// `GEMINI_MODEL`, when set and non-empty, overrides the model name.
    pub fn from_env() -> Result<Self> {
        let api_key = ["GEMINI_API_KEY", "GOOGLE_API_KEY"]
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .find(|value| !value.trim().is_empty())
            .ok_or_else(|| ModelError::MissingCredentials {
                provider: PROVIDER.into(),
                message: "neither GEMINI_API_KEY nor GOOGLE_API_KEY is set".into(),
            })?;

        let config = Self::new(api_key)?;
        match std::env::var("GEMINI_MODEL") {
            Ok(model) if !model.trim().is_empty() => Ok(config.with_model(model)),
            _ => Ok(config),
        }
    }

    /// Set the model name. A leading `models/` is accepted and stripped.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        let model = model.into();
        self.model = model.strip_prefix("models/").map(str::to_string).unwrap_or(model);
        self
    }

    /// Point the client at a different API root (proxies, test servers).
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self> {
        let mut url = Url::parse(base_url)
            .map_err(|e| ModelError::Config(format!("invalid base URL '{base_url}': {e}")))?;
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        self.base_url = url;
        Ok(self)
    }

    /// The configured model name.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// The configured API root.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self) -> Result<Url> {
        let suffix = format!("models/{}:generateContent", self.model);
        self.base_url
            .join(&suffix)
            .map_err(|e| ModelError::Config(format!("failed to construct URL for '{suffix}': {e}")))
    }
}

/// A [`GenerativeModel`] backed by Gemini `generateContent`.
pub struct GeminiModel {
    http_client: reqwest::Client,
    endpoint: Url,
    model: String,
}

impl GeminiModel {
    /// Build a client from `config`.
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let key = HeaderValue::from_str(&config.api_key)
            .map_err(|e| ModelError::Config(format!("failed to parse API key: {e}")))?;
        let headers = HeaderMap::from_iter([(HeaderName::from_static("x-goog-api-key"), key)]);

        let http_client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| ModelError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { http_client, endpoint: config.endpoint()?, model: config.model })
    }

    /// Build a client from the environment; see [`GeminiConfig::from_env`].
    pub fn from_env() -> Result<Self> {
        Self::new(GeminiConfig::from_env()?)
    }
}

// ── Gemini API request/response types ──────────────────────────────

#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Serialize)]
struct RequestContent<'a> {
    role: &'a str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

/// Concatenate the text parts of the first candidate.
fn extract_text(response: GenerateContentResponse) -> Result<String> {
    let block_reason = response.prompt_feedback.and_then(|f| f.block_reason);
    let Some(candidate) = response.candidates.into_iter().next() else {
        return Err(ModelError::EmptyResponse {
            provider: PROVIDER.into(),
            reason: block_reason.unwrap_or_else(|| "no candidates".into()),
        });
    };

    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.is_empty() {
        return Err(ModelError::EmptyResponse {
            provider: PROVIDER.into(),
            reason: candidate.finish_reason.unwrap_or_else(|| "empty content".into()),
        });
    }
    Ok(text)
}

#[async_trait]
impl GenerativeModel for GeminiModel {
    fn name(&self) -> &str {
        &self.model
    }

    #[instrument(skip_all, fields(model = %self.model))]
    async fn generate(&self, prompt: &str) -> Result<String> {
        debug!(provider = PROVIDER, prompt_len = prompt.len(), "sending generateContent request");

        let body = GenerateContentRequest {
            contents: vec![RequestContent {
                role: "user",
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        let response =
            self.http_client.post(self.endpoint.clone()).json(&body).send().await.map_err(|e| {
                error!(provider = PROVIDER, error = %e, "request failed");
                ModelError::Request { provider: PROVIDER.into(), message: e.to_string() }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);

            error!(provider = PROVIDER, %status, "API error");
            return Err(ModelError::Api {
                provider: PROVIDER.into(),
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateContentResponse = response.json().await.map_err(|e| {
            error!(provider = PROVIDER, error = %e, "failed to parse response");
            ModelError::Request {
                provider: PROVIDER.into(),
                message: format!("failed to parse response: {e}"),
            }
        })?;

        let text = extract_text(parsed)?;
        debug!(provider = PROVIDER, response_len = text.len(), "received generateContent response");
        Ok(text)
    }
}
