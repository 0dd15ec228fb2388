//! # medrag-model
//!
//! Generative model integrations for the medrag pipeline.
//!
//! ## Overview
//!
//! The pipeline only needs one thing from a model: turn a fully rendered
//! prompt into text. That contract is the [`GenerativeModel`] trait.
//! This crate ships two implementations:
//!
//! - [`GeminiModel`] - Google's Gemini models over the REST API
//! - [`MockModel`] - scripted model for tests and offline runs
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use medrag_model::{GeminiConfig, GeminiModel, GenerativeModel};
//!
//! # async fn run() -> medrag_model::Result<()> {
//! let model = GeminiModel::new(GeminiConfig::from_env()?)?;
//! let text = model.generate("What are the symptoms of flu?").await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Supported Models
//!
//! | Model | Description |
//! |-------|-------------|
//! | `gemini-2.5-flash` | Fast, efficient model (default) |
//! | `gemini-2.5-flash-lite` | Cheapest, lowest latency |
//! | `gemini-2.5-pro` | Most capable model |

pub mod error;
#[cfg(feature = "gemini")]
pub mod gemini;
pub mod mock;
pub mod model;

pub use error::{ModelError, Result};
#[cfg(feature = "gemini")]
pub use gemini::{GeminiConfig, GeminiModel};
pub use mock::MockModel;
pub use model::GenerativeModel;
