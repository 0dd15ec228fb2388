//! Scripted model for tests and offline runs.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::error::{ModelError, Result};
use crate::model::GenerativeModel;

#[derive(Debug, Clone)]
enum Behavior {
    Reply(String),
    Fail(String),
    Delayed(Duration, String),
}

/// A [`GenerativeModel`] with a fixed, scripted behaviour.
///
/// Every prompt it receives is recorded so tests can inspect what the
/// pipeline actually sent.
#[derive(Debug)]
pub struct MockModel {
    name: String,
    behavior: Behavior,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl MockModel {
    fn with_behavior(behavior: Behavior) -> Self {
        Self {
            name: "mock-model".to_string(),
            behavior,
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// A model that always answers with `text`.
    pub fn replying(text: impl Into<String>) -> Self {
        Self::with_behavior(Behavior::Reply(text.into()))
    }

    /// A model whose every call fails with a request error.
    pub fn failing(message: impl Into<String>) -> Self {
        Self::with_behavior(Behavior::Fail(message.into()))
    }

    /// A model that sleeps for `delay` before answering with `text`.
    pub fn delayed(delay: Duration, text: impl Into<String>) -> Self {
        Self::with_behavior(Behavior::Delayed(delay, text.into()))
    }

    /// Override the reported model name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Number of times [`generate`](GenerativeModel::generate) was called.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Prompts received so far, oldest first.
    pub async fn prompts(&self) -> Vec<String> {
        self.prompts.lock().await.clone()
    }
}

#[async_trait]
impl GenerativeModel for MockModel {
    fn name(&self) -> &str {
        &self.name
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().await.push(prompt.to_string());

        match &self.behavior {
            Behavior::Reply(text) => Ok(text.clone()),
            Behavior::Fail(message) => {
                Err(ModelError::Request { provider: "mock".into(), message: message.clone() })
            }
            Behavior::Delayed(delay, text) => {
                tokio::time::sleep(*delay).await;
                Ok(text.clone())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn replying_records_prompts() {
        let model = MockModel::replying("ok");
        assert_eq!(model.generate("first").await.unwrap(), "ok");
        assert_eq!(model.generate("second").await.unwrap(), "ok");
        assert_eq!(model.call_count(), 2);
        assert_eq!(model.prompts().await, vec!["first".to_string(), "second".to_string()]);
    }

    #[tokio::test]
    async fn failing_returns_request_error() {
        let model = MockModel::failing("boom");
        let err = model.generate("anything").await.unwrap_err();
        assert!(matches!(err, ModelError::Request { .. }));
        assert!(err.to_string().contains("boom"));
    }

    #[tokio::test(start_paused = true)]
    async fn delayed_waits_before_answering() {
        let model = MockModel::delayed(Duration::from_secs(5), "late");
        let start = tokio::time::Instant::now();
        assert_eq!(model.generate("q").await.unwrap(), "late");
        assert!(start.elapsed() >= Duration::from_secs(5));
    }

    #[test]
    fn custom_name() {
        let model = MockModel::replying("x").with_name("scripted");
        assert_eq!(model.name(), "scripted");
    }
}
