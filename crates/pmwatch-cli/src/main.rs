mod run;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use pmwatch_core::{load_sources, SeenStore};
use pmwatch_notify::SmtpNotifier;
use pmwatch_scorer::{GeminiClassifier, GeminiClient, GeminiScorer};
use pmwatch_scraper::{BoardClient, ChromiumRenderer, Extractor};
use tracing_subscriber::EnvFilter;

use crate::run::{deliver_and_persist, Pipeline};

#[derive(Debug, Parser)]
#[command(name = "pmwatch")]
#[command(about = "Watch company career pages for new Product Manager roles")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Poll every configured source once and email a digest of new postings.
    Run {
        /// Sources YAML file (overrides PMWATCH_SOURCES_PATH).
        #[arg(long)]
        sources: Option<PathBuf>,
        /// Seen-store JSON file (overrides PMWATCH_SEEN_PATH).
        #[arg(long)]
        seen: Option<PathBuf>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = pmwatch_core::load_app_config()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match cli.command {
        Some(Commands::Run { sources, seen }) => {
            if let Some(path) = sources {
                config.sources_path = path;
            }
            if let Some(path) = seen {
                config.seen_path = path;
            }
            run(&config).await
        }
        None => run(&config).await,
    }
}

async fn run(config: &pmwatch_core::AppConfig) -> anyhow::Result<()> {
    let sources = load_sources(&config.sources_path).with_context(|| {
        format!(
            "failed to load sources from {}",
            config.sources_path.display()
        )
    })?;
    let mut seen = SeenStore::load(&config.seen_path);

    tracing::info!(
        sources = sources.sources.len(),
        known_companies = seen.companies().len(),
        "starting run"
    );

    let client = BoardClient::new(config.request_timeout_secs, &config.user_agent)?;
    let renderer = ChromiumRenderer::new(
        &config.chromium_path,
        &config.user_agent,
        config.render_timeout_secs,
        config.render_settle_ms,
    );
    let extractor = Extractor::new(client, renderer);

    let gemini = GeminiClient::new(config.gemini_api_key.as_deref(), config.request_timeout_secs)?;
    if !gemini.has_credential() {
        tracing::warn!("GEMINI_API_KEY is not set; every posting gets the neutral score");
    }
    let scorer = GeminiScorer::new(
        gemini.clone(),
        &config.gemini_model,
        Duration::from_secs(config.rate_limit_retry_secs),
    );
    let classifier = GeminiClassifier::new(gemini, &config.classifier_model);

    let pipeline = Pipeline {
        extractor: &extractor,
        scorer: &scorer,
        classifier: &classifier,
        score_threshold: config.score_threshold,
    };
    let outcome = pipeline.process_sources(&sources.sources, &mut seen).await;

    tracing::info!(
        qualifying = outcome.qualifying.len(),
        errors = outcome.errors.len(),
        "sources processed"
    );

    let notifier = SmtpNotifier::new(
        &config.smtp_host,
        config.gmail_user.clone(),
        config.gmail_app_password.clone(),
    );
    deliver_and_persist(&notifier, &outcome, &seen, &config.seen_path).await?;

    Ok(())
}
