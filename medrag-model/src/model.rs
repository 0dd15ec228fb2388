//! The generative model trait.

use async_trait::async_trait;

use crate::error::Result;

/// A text-in, text-out generative model.
///
/// The prompt passed to [`generate`](GenerativeModel::generate) is final:
/// any scope or grounding policy is already rendered into it, and callers
/// use the returned text verbatim.
///
/// # Example
///
/// ```rust,ignore
/// use medrag_model::{GenerativeModel, MockModel};
///
/// let model = MockModel::replying("Flu is a viral infection.");
/// let text = model.generate("What is flu?").await?;
/// ```
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    /// The model identifier, e.g. `gemini-2.5-flash`.
    fn name(&self) -> &str;

    /// Generate a completion for a single prompt.
    async fn generate(&self, prompt: &str) -> Result<String>;
}
