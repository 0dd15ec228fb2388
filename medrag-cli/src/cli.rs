//! Command-line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "medrag", version, about = "Grounded answers to medical questions from a local corpus")]
pub struct Cli {
    #[command(flatten)]
    pub pipeline: PipelineArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Answer a medical question
    Ask {
        /// The question; several words are joined with spaces
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },

    /// List the documents in the corpus
    List,

    /// Show corpus size and model availability
    Health,
}

#[derive(Args, Debug, Clone)]
pub struct PipelineArgs {
    /// JSON array of medical documents
    #[arg(long, env = "MEDRAG_DATASET", default_value = "data/medical_dataset.json", global = true)]
    pub dataset: PathBuf,

    /// Number of documents retrieved per question
    #[arg(long, default_value_t = 5, global = true)]
    pub top_k: usize,

    /// Seconds to wait for the model before answering from the template
    #[arg(long, default_value_t = 30, global = true)]
    pub timeout_secs: u64,

    /// Gemini model name (API key from GEMINI_API_KEY or GOOGLE_API_KEY)
    #[arg(long, env = "GEMINI_MODEL", global = true)]
    pub model: Option<String>,

    /// Never call the model; always answer from the template
    #[arg(long, global = true)]
    pub offline: bool,
}
