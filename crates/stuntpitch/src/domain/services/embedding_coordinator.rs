//! Embedding Coordinator - Batch embedding generation for performer profiles
//!
//! Computes a semantic vector for each profile through the embedding provider
//! and writes it back to the profile store.
//!
//! Processing is strictly sequential: the provider is rate limited, so a
//! batch is walked chunk by chunk with an optional pause between chunks.
//! Per-profile failures inside a batch are logged and counted; only a failed
//! selection query aborts the run.

use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::config::EmbeddingConfig;
use crate::domain::{
    BatchReport, DomainError, EmbeddingJob, EmbeddingResult, JobOutcome, Profile,
    SelectionPolicy,
};
use crate::ports::{EmbeddingService, ProfileRepository};

/// Coordinates embedding generation between the profile store and the provider
pub struct EmbeddingCoordinator {
    repo: Arc<dyn ProfileRepository>,
    embedder: Arc<dyn EmbeddingService>,
    config: EmbeddingConfig,
}

impl EmbeddingCoordinator {
    pub fn new(
        repo: Arc<dyn ProfileRepository>,
        embedder: Arc<dyn EmbeddingService>,
        config: EmbeddingConfig,
    ) -> Self {
        Self {
            repo,
            embedder,
            config,
        }
    }

    pub fn config(&self) -> &EmbeddingConfig {
        &self.config
    }

    /// Run a job built by one of the entry points
    pub async fn run(&self, job: EmbeddingJob) -> Result<JobOutcome, DomainError> {
        match job {
            EmbeddingJob::Single(profile_id) => {
                let dimensions = self.generate_one(profile_id).await?;
                Ok(JobOutcome::Single {
                    profile_id,
                    dimensions,
                })
            }
            EmbeddingJob::Batch { batch_size } => {
                let report = self.generate_all(batch_size).await?;
                Ok(JobOutcome::Batch(report))
            }
        }
    }

    /// Generate and store the embedding for one profile.
    ///
    /// Always recomputes, even if the profile already has an embedding.
    /// Returns the number of dimensions written.
    pub async fn generate_one(&self, profile_id: Uuid) -> Result<usize, DomainError> {
        let profile = self
            .repo
            .find_by_id(profile_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Profile", profile_id))?;

        let dimensions = self.embed_profile(&profile).await?;
        tracing::info!("🧬 Embedding generated for profile {}", profile_id);

        Ok(dimensions)
    }

    /// Generate embeddings for up to `batch_size` selected profiles.
    ///
    /// Never fails because of an individual profile; the returned report
    /// carries the success and failure counts.
    pub async fn generate_all(&self, batch_size: usize) -> Result<BatchReport, DomainError> {
        if batch_size == 0 {
            return Err(DomainError::Validation(
                "Batch size must be at least 1".to_string(),
            ));
        }

        let profiles = match self.config.selection {
            SelectionPolicy::MissingOnly => self.repo.find_missing_embedding(batch_size).await,
            SelectionPolicy::All => self.repo.find_all(batch_size).await,
        }
        .inspect_err(|e| tracing::error!("Profile selection failed: {}", e))?;

        // Mutations stay bounded by batch_size even if the store over-returns
        let profiles = &profiles[..profiles.len().min(batch_size)];

        tracing::info!(
            "Selected {} profiles for embedding (policy: {}, batch size: {})",
            profiles.len(),
            self.config.selection,
            batch_size
        );

        let mut report = BatchReport::new(profiles.len());
        let chunk_size = self.config.chunk_size.clamp(1, batch_size);
        let total_chunks = profiles.len().div_ceil(chunk_size);

        for (index, chunk) in profiles.chunks(chunk_size).enumerate() {
            if index > 0 && !self.config.chunk_delay.is_zero() {
                tokio::time::sleep(self.config.chunk_delay).await;
            }

            tracing::info!(
                "Processing chunk {}/{} ({} profiles)",
                index + 1,
                total_chunks,
                chunk.len()
            );

            for profile in chunk {
                let result = match self.embed_profile(profile).await {
                    Ok(dimensions) => {
                        tracing::info!("✅ Profile {} embedded", profile.id);
                        EmbeddingResult::embedded(profile.id, dimensions)
                    }
                    Err(e) => {
                        tracing::warn!("⚠️  Profile {} failed: {}", profile.id, e);
                        EmbeddingResult::failed(profile.id, e.to_string())
                    }
                };
                report.record(result);
            }
        }

        tracing::info!(
            "Embedding batch finished: {} succeeded, {} failed",
            report.succeeded,
            report.failed
        );

        Ok(report)
    }

    /// Per-profile computation shared by both operations
    async fn embed_profile(&self, profile: &Profile) -> Result<usize, DomainError> {
        let input = profile.embedding_input().ok_or_else(|| {
            DomainError::Validation(format!("Profile {} has no text to embed", profile.id))
        })?;

        let embedding = self.embedder.embed(&input).await?;

        if embedding.len() != self.config.dimensions {
            return Err(DomainError::Upstream(format!(
                "Provider returned {} dimensions, expected {}",
                embedding.len(),
                self.config.dimensions
            )));
        }

        if embedding.iter().any(|v| !v.is_finite()) {
            return Err(DomainError::Upstream(
                "Provider returned a non-finite embedding value".to_string(),
            ));
        }

        let updated = self
            .repo
            .update_embedding(profile.id, &embedding, Utc::now())
            .await?;

        if !updated {
            return Err(DomainError::Persistence(format!(
                "Profile {} disappeared before its embedding was written",
                profile.id
            )));
        }

        Ok(embedding.len())
    }
}
