//! StuntPitch CLI - Embedding regeneration
//!
//! Runs the embedding coordinator directly against the profile store:
//!
//! ```text
//! stuntpitch-embed --profile=<id>   # one profile
//! stuntpitch-embed --batch=20       # up to 20 profiles missing an embedding
//! ```

mod config;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use sqlx::postgres::PgPoolOptions;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use stuntpitch::{
    EmbeddingConfig, EmbeddingCoordinator, EmbeddingJob, EmbeddingOutcome, JobOutcome,
    SelectionPolicy,
};
use stuntpitch_server::adapters::{OpenAiEmbeddingService, PgProfileRepository};

use config::Config;

#[derive(Parser)]
#[command(name = "stuntpitch-embed")]
#[command(about = "Generate semantic embeddings for StuntPitch profiles", long_about = None)]
#[command(version)]
struct Cli {
    /// Regenerate a single profile by ID
    #[arg(long)]
    profile: Option<String>,

    /// Maximum number of profiles to process
    #[arg(long, default_value_t = 5)]
    batch: usize,

    /// Select every profile, not only those missing an embedding
    #[arg(long)]
    all: bool,

    /// Config file (defaults to ~/.config/stuntpitch/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Postgres connection string (overrides config file)
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: Option<String>,

    /// OpenAI API key (overrides config file)
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    openai_api_key: Option<String>,
}

impl Cli {
    /// Job described by `--profile` / `--batch`
    fn job(&self) -> Result<EmbeddingJob> {
        let profile_id = self
            .profile
            .as_deref()
            .map(|raw| {
                Uuid::parse_str(raw.trim()).with_context(|| format!("Invalid profile ID: {}", raw))
            })
            .transpose()?;

        Ok(EmbeddingJob::from_params(profile_id, self.batch))
    }

    fn apply_selection(&self, config: &mut EmbeddingConfig) {
        if self.all {
            config.selection = SelectionPolicy::All;
        }
    }
}

#[tokio::main]
async fn main() {
    // .env must be loaded before clap reads `env` fallbacks
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("stuntpitch=info")),
        )
        .with_target(false)
        .init();

    if let Err(e) = run(cli).await {
        eprintln!("{} {:#}", "✗".red(), e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let file_config = Config::load(cli.config.as_deref())?;

    let job = cli.job()?;

    let mut embedding_config = file_config
        .embedding
        .overridden_by(|key| std::env::var(key).ok())
        .context("Invalid embedding configuration")?;
    cli.apply_selection(&mut embedding_config);

    let database_url = cli
        .database_url
        .or(file_config.database_url)
        .context("No database URL. Set DATABASE_URL or database_url in the config file")?;
    let openai_api_key = cli
        .openai_api_key
        .or(file_config.openai_api_key)
        .context("No OpenAI API key. Set OPENAI_API_KEY or openai_api_key in the config file")?;

    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(&database_url)
        .await
        .context("Failed to connect to the profile database")?;

    let mut embedder = OpenAiEmbeddingService::new(openai_api_key, &embedding_config)?;
    if let Some(base_url) = file_config.openai_base_url {
        embedder = embedder.with_base_url(base_url);
    }

    let coordinator = EmbeddingCoordinator::new(
        Arc::new(PgProfileRepository::new(pool)),
        Arc::new(embedder),
        embedding_config,
    );

    match job {
        EmbeddingJob::Single(id) => println!("Generating embedding for profile {}...", id),
        EmbeddingJob::Batch { batch_size } => println!(
            "Generating embeddings for up to {} profiles ({})...",
            batch_size,
            coordinator.config().selection
        ),
    }

    let outcome = coordinator.run(job).await?;
    print_outcome(&outcome);

    Ok(())
}

fn print_outcome(outcome: &JobOutcome) {
    if let JobOutcome::Batch(report) = outcome {
        for failure in &report.failures {
            if let EmbeddingOutcome::Failed { reason } = &failure.outcome {
                println!("  {} {} {}", "✗".red(), failure.profile_id, reason.dimmed());
            }
        }
        if report.failed > 0 {
            println!("{} {}", "!".yellow(), outcome.message());
            return;
        }
    }

    println!("{} {}", "✓".green(), outcome.message());
}
