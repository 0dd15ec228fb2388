//! # medrag-cli
//!
//! Command-line front end for [`medrag_rag::MedicalRag`].
//!
//! ```bash
//! medrag ask "I have a fever and a cough"
//! medrag list --dataset data/medical_dataset.json
//! medrag health --offline
//! ```
//!
//! Results are printed as JSON on stdout; logs go to stderr.

pub mod app;
pub mod cli;

pub use app::{build_pipeline, run};
pub use cli::{Cli, Commands, PipelineArgs};
