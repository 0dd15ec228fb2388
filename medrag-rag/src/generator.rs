//! Guarded answer generation.
//!
//! [`GuardedGenerator`] turns retrieved documents into an answer in one of
//! three ways, checked in order:
//!
//! 1. nothing was retrieved: a fixed medical-only refusal, no model call;
//! 2. a model is configured and answers in time: its text, verbatim;
//! 3. otherwise: a deterministic answer quoting the start of the context.
//!
//! Generation never fails. Model errors are logged and absorbed into the
//! fallback.

use std::sync::Arc;
use std::time::Duration;

use medrag_model::{GenerativeModel, ModelError};
use tracing::{debug, info, warn};

use crate::config::RagConfig;
use crate::context::GenerationContext;
use crate::document::Document;
use crate::error::Result;

/// Returned when retrieval finds nothing relevant.
pub const NO_CONTEXT_REFUSAL: &str = "I'm a medical information assistant and I couldn't find relevant information about that in my medical database. I can only answer questions related to health conditions, symptoms, and medical topics. Please try asking a medical question.";

/// Closing line every answer must carry.
pub const DISCLAIMER: &str = "⚠️ This is educational information only. Please consult a healthcare professional for proper diagnosis and treatment.";

/// What the model is told to say for non-medical questions.
pub const OUT_OF_SCOPE_REPLY: &str = "I'm a specialized medical information assistant. I can only answer questions about health conditions, symptoms, diseases, and medical topics based on my medical database. Please ask a medical or health-related question.";

/// Render the scope-restricted, grounded prompt sent to the model.
pub fn build_prompt(query: &str, context: &str) -> String {
    format!(
        "You are a specialized Medical Information Assistant backed by a retrieval system. \
Your role is STRICTLY LIMITED to answering medical and health-related questions using ONLY the medical database excerpts provided below.

STRICT RULES:
1. ONLY answer questions about health, medical conditions, symptoms, diseases, and treatments.
2. Use ONLY the medical information provided below. DO NOT use your general knowledge.
3. If the question is not medical (weather, sports, politics, coding, general knowledge, etc.), politely refuse and redirect to medical topics.
4. If the medical database excerpts do not contain the answer, say so clearly.
5. Always remind the user that this is educational information and that they should consult healthcare professionals.
6. Be empathetic, clear, and professional.

User Question: {query}

Medical Database Information:
{context}

RESPONSE FORMAT:
- Start with a direct, helpful answer to the medical question.
- Use information from the medical database above.
- Include relevant symptoms, treatments, and when to seek care.
- End with: \"{DISCLAIMER}\"

If the question is NOT medical, respond exactly:
\"{OUT_OF_SCOPE_REPLY}\"

Now provide your response:"
    )
}

/// Render the deterministic answer used when the model cannot be used.
pub fn fallback_answer(
    query: &str,
    context: &GenerationContext,
    source_count: usize,
    excerpt_chars: usize,
) -> String {
    format!(
        "Based on the medical information I found:\n\n{}...\n\n\
**Regarding your question about '{query}':**\n\
The information above from {source_count} medical source(s) may be relevant.\n\n\
{DISCLAIMER}",
        context.excerpt(excerpt_chars)
    )
}

/// Which path produced an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerOrigin {
    /// Nothing was retrieved; the fixed refusal was returned.
    NoContext,
    /// The generative model answered.
    Model,
    /// The model was unavailable or failed; the templated answer was used.
    Fallback,
}

/// An answer together with the path that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    /// The answer text.
    pub answer: String,
    /// How the answer was produced.
    pub origin: AnswerOrigin,
}

/// Produces answers grounded on retrieved documents.
pub struct GuardedGenerator {
    model: Option<Arc<dyn GenerativeModel>>,
    model_timeout: Duration,
    fallback_excerpt_chars: usize,
}

impl std::fmt::Debug for GuardedGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GuardedGenerator")
            .field("model", &self.model.as_ref().map(|m| m.name().to_string()))
            .field("model_timeout", &self.model_timeout)
            .field("fallback_excerpt_chars", &self.fallback_excerpt_chars)
            .finish()
    }
}

impl GuardedGenerator {
    /// Create a generator. With `model == None` every answer with context
    /// takes the fallback path.
    pub fn new(model: Option<Arc<dyn GenerativeModel>>, config: &RagConfig) -> Self {
        Self {
            model,
            model_timeout: config.model_timeout,
            fallback_excerpt_chars: config.fallback_excerpt_chars,
        }
    }

    /// Whether a generative model is attached.
    pub fn has_model(&self) -> bool {
        self.model.is_some()
    }

    /// Produce the answer text for `query` from `documents`.
    pub async fn generate(&self, query: &str, documents: &[&Document]) -> String {
        self.generate_with_origin(query, documents).await.answer
    }

    /// Like [`generate`](Self::generate), also reporting which path answered.
    pub async fn generate_with_origin(&self, query: &str, documents: &[&Document]) -> Generated {
        let context = GenerationContext::assemble(documents);
        let Some(context_text) = context.as_text() else {
            info!("no relevant documents, returning refusal");
            return Generated {
                answer: NO_CONTEXT_REFUSAL.to_string(),
                origin: AnswerOrigin::NoContext,
            };
        };

        let fallback = || {
            let answer =
                fallback_answer(query, &context, documents.len(), self.fallback_excerpt_chars);
            Generated { answer, origin: AnswerOrigin::Fallback }
        };

        let Some(model) = &self.model else {
            debug!("no generative model configured, using fallback answer");
            return fallback();
        };

        match self.call_model(model.as_ref(), query, context_text).await {
            Ok(answer) => Generated { answer, origin: AnswerOrigin::Model },
            Err(e) => {
                warn!(
                    error = %e,
                    source_count = documents.len(),
                    "model call failed, using fallback answer"
                );
                fallback()
            }
        }
    }

    async fn call_model(
        &self,
        model: &dyn GenerativeModel,
        query: &str,
        context: &str,
    ) -> Result<String> {
        let prompt = build_prompt(query, context);
        debug!(model = model.name(), prompt_len = prompt.len(), "calling generative model");

        let answer = tokio::time::timeout(self.model_timeout, model.generate(&prompt))
            .await
            .map_err(|_| ModelError::Timeout(self.model_timeout))??;
        info!(model = model.name(), answer_len = answer.len(), "model answered");
        Ok(answer)
    }
}
