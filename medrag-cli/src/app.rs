//! Pipeline construction and command dispatch.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use medrag_model::{GeminiConfig, GeminiModel, GenerativeModel};
use medrag_rag::{Corpus, MedicalRag, RagConfig};
use tracing::{info, warn};

use crate::cli::{Cli, Commands, PipelineArgs};

/// Build the Gemini model, or `None` when offline or unconfigured.
///
/// A missing key is not an error: the pipeline answers from its template.
pub fn build_model(args: &PipelineArgs) -> Option<Arc<dyn GenerativeModel>> {
    if args.offline {
        info!("offline mode, generative model disabled");
        return None;
    }

    let config = match GeminiConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            warn!(error = %e, "generative model not configured, answers will use the template");
            return None;
        }
    };
    let config = match &args.model {
        Some(model) => config.with_model(model.as_str()),
        None => config,
    };

    match GeminiModel::new(config) {
        Ok(model) => {
            info!(model = model.name(), "generative model configured");
            let model: Arc<dyn GenerativeModel> = Arc::new(model);
            Some(model)
        }
        Err(e) => {
            warn!(error = %e, "failed to create generative model client");
            None
        }
    }
}

/// Load the corpus and assemble the pipeline from command-line arguments.
pub fn build_pipeline(args: &PipelineArgs) -> anyhow::Result<MedicalRag> {
    let config = RagConfig::builder()
        .top_k(args.top_k)
        .model_timeout(Duration::from_secs(args.timeout_secs))
        .build()
        .context("invalid pipeline configuration")?;

    let corpus = Corpus::load_or_empty(&args.dataset);

    MedicalRag::builder()
        .config(config)
        .corpus(corpus)
        .maybe_model(build_model(args))
        .build()
        .context("failed to build pipeline")
}

/// Run one command and return its JSON output.
pub async fn run(cli: &Cli) -> anyhow::Result<String> {
    let pipeline = build_pipeline(&cli.pipeline)?;

    let output = match &cli.command {
        Commands::Ask { query } => {
            let question = query.join(" ");
            let result =
                pipeline.handle_query(&question).await.context("failed to answer question")?;
            serde_json::to_string_pretty(&result)?
        }
        Commands::List => serde_json::to_string_pretty(&pipeline.catalog())?,
        Commands::Health => serde_json::to_string_pretty(&pipeline.health())?,
    };
    Ok(output)
}
