//! # medrag-rag
//!
//! Grounded question answering over a small, fixed medical corpus.
//!
//! A query is scored against every [`Document`] with a lexical keyword
//! heuristic, the best matches are assembled into a context block, and a
//! [`GuardedGenerator`] answers from that context only: through a
//! scope-restricted prompt to a [`GenerativeModel`] when one is available,
//! or through a deterministic template when it is not.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`document`] | `Document` and `SourceRef` |
//! | [`corpus`] | Read-only corpus and JSON loader |
//! | [`retrieval`] | Keyword scoring and top-k ranking |
//! | [`context`] | Grounding context assembly |
//! | [`generator`] | Model call with refusal and fallback paths |
//! | [`response`] | Caller-facing result types |
//! | [`request`] | Inbound chat request |
//! | [`pipeline`] | `MedicalRag` orchestrator |
//! | [`config`] | Pipeline configuration |
//! | [`error`] | Error taxonomy |

pub mod config;
pub mod context;
pub mod corpus;
pub mod document;
pub mod error;
pub mod generator;
pub mod pipeline;
pub mod request;
pub mod response;
pub mod retrieval;

pub use config::{RagConfig, RagConfigBuilder};
pub use context::GenerationContext;
pub use corpus::Corpus;
pub use document::{Document, SourceRef};
pub use error::{RagError, Result};
pub use generator::{AnswerOrigin, DISCLAIMER, Generated, GuardedGenerator, NO_CONTEXT_REFUSAL};
pub use medrag_model::GenerativeModel;
pub use pipeline::{MedicalRag, MedicalRagBuilder};
pub use request::ChatRequest;
pub use response::{ChatResult, DocumentCatalog, HealthStatus, MAX_SOURCES, assemble_response};
pub use retrieval::{ScoredDocument, score_and_rank};
