use anyhow::{anyhow, Context};
use sqlx::PgPool;
use std::sync::Arc;

use stuntpitch::{EmbeddingConfig, EmbeddingCoordinator};
use stuntpitch_server::adapters::{OpenAiEmbeddingService, PgProfileRepository};
use stuntpitch_server::AppState;

#[shuttle_runtime::main]
async fn main(
    #[shuttle_shared_db::Postgres] pool: PgPool,
    #[shuttle_runtime::Secrets] secrets: shuttle_runtime::SecretStore,
) -> shuttle_axum::ShuttleAxum {
    tracing::info!("🎬 StuntPitch API initializing...");

    let config =
        EmbeddingConfig::from_lookup(|key| secrets.get(key)).context("Invalid embedding config")?;

    let openai_key = secrets
        .get("OPENAI_API_KEY")
        .ok_or_else(|| anyhow!("OPENAI_API_KEY secret is required"))?;

    let mut embedder = OpenAiEmbeddingService::new(openai_key, &config)
        .context("Failed to initialize embedding service")?;
    if let Some(base_url) = secrets.get("OPENAI_BASE_URL") {
        embedder = embedder.with_base_url(base_url);
    }
    tracing::info!(
        "🧬 Embedding service initialized ({}, {} dims)",
        config.model,
        config.dimensions
    );

    let api_key = secrets.get("STUNTPITCH_API_KEY");
    if api_key.is_some() {
        tracing::info!("🔐 API key authentication enabled");
    } else {
        tracing::warn!("⚠️  No STUNTPITCH_API_KEY set - authentication disabled");
    }

    let repo = Arc::new(PgProfileRepository::new(pool));
    let coordinator = Arc::new(EmbeddingCoordinator::new(repo, Arc::new(embedder), config));

    let router = stuntpitch_server::app(AppState::new(coordinator, api_key));

    tracing::info!("📚 Swagger UI: /swagger-ui");
    tracing::info!("✅ StuntPitch API ready");

    Ok(router.into())
}
