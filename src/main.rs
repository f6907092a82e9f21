// src/main.rs — interview-coach entry point

use clap::Parser;
use std::sync::Arc;

use interview_coach::cli::{Cli, Commands};
use interview_coach::infra::config::Config;
use interview_coach::infra::{logger, paths};
use interview_coach::interview::{InterviewClient, InterviewWorkflow, WorkflowSettings};
use interview_coach::memory::{self, store_server};
use interview_coach::provider::openai_compat::OpenAICompatProvider;
use interview_coach::provider::ModelProvider;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load config (falls back to defaults if no config.toml)
    let mut config = if let Some(ref path) = cli.config {
        Config::load_from(std::path::Path::new(path))?
    } else {
        Config::load()?
    };

    // RUST_LOG wins over the configured level
    logger::init_logging(&config.logging.level);

    if let Some(ref model) = cli.model {
        config.provider.model = model.clone();
    }

    paths::ensure_dirs()?;
    let store = memory::open_store(&paths::db_path())?;
    let (store, _store_task) = store_server::spawn_store_server(store);

    // Commands that only need the database
    match &cli.command {
        Some(Commands::History { limit, delete, yes }) => {
            let limit = limit.unwrap_or(config.interview.history_limit);
            return interview_coach::cli::history::run_history(&store, limit, *delete, *yes).await;
        }
        Some(Commands::Stats) => {
            return interview_coach::cli::history::run_stats(&store).await;
        }
        _ => {}
    }

    let provider: Arc<dyn ModelProvider> = Arc::new(OpenAICompatProvider::from_config(&config.provider)?);
    tracing::debug!("Using {} ({})", provider.name(), config.provider.model);

    let client = InterviewClient::new(provider).with_temperature(config.provider.temperature);
    let settings = WorkflowSettings::new(config.provider.model.clone(), &config.interview);
    let workflow = Arc::new(InterviewWorkflow::new(client, store, settings));

    match cli.command {
        Some(Commands::Ask { topic }) => {
            let topic = topic.or(cli.topic);
            interview_coach::cli::ask::run_ask(&workflow, topic.as_deref()).await
        }
        Some(Commands::Score {
            question,
            answer,
            topic,
        }) => {
            let topic = topic.or(cli.topic);
            interview_coach::cli::ask::run_score(
                &workflow,
                &question,
                answer.as_deref(),
                topic.as_deref(),
            )
            .await
        }
        Some(Commands::Practice) | None => {
            interview_coach::cli::practice::run_practice(workflow, &config, cli.topic).await
        }
        Some(Commands::History { .. }) | Some(Commands::Stats) => Ok(()),
    }
}
