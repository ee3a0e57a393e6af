//! In-memory port implementations
//!
//! Deterministic stand-ins for the profile store and the embedding provider.
//! Compiled for this crate's tests and for dependents enabling the `testing`
//! feature.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::{DomainError, Profile};
use crate::ports::{EmbeddingService, ProfileRepository};

/// Profile store held in a Vec, preserving insertion order
#[derive(Default)]
pub struct InMemoryProfileRepository {
    profiles: RwLock<Vec<Profile>>,
    writes: Mutex<Vec<Uuid>>,
    fail_selection: AtomicBool,
    fail_writes: AtomicBool,
}

impl InMemoryProfileRepository {
    pub fn with_profiles(profiles: Vec<Profile>) -> Self {
        Self {
            profiles: RwLock::new(profiles),
            ..Default::default()
        }
    }

    pub async fn get(&self, id: Uuid) -> Option<Profile> {
        self.profiles.read().await.iter().find(|p| p.id == id).cloned()
    }

    pub async fn missing_count(&self) -> usize {
        self.profiles
            .read()
            .await
            .iter()
            .filter(|p| !p.has_embedding())
            .count()
    }

    /// Number of successful embedding writes so far
    pub fn write_count(&self) -> usize {
        self.write_log().len()
    }

    /// Profile ids in the order their embeddings were written
    pub fn write_log(&self) -> Vec<Uuid> {
        self.writes.lock().map(|w| w.clone()).unwrap_or_default()
    }

    /// Make selection queries fail
    pub fn fail_selection(&self, fail: bool) {
        self.fail_selection.store(fail, Ordering::SeqCst);
    }

    /// Make embedding writes fail
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check_selection(&self) -> Result<(), DomainError> {
        if self.fail_selection.load(Ordering::SeqCst) {
            return Err(DomainError::Persistence(
                "selection query failed".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Profile>, DomainError> {
        Ok(self.get(id).await)
    }

    async fn find_missing_embedding(&self, limit: usize) -> Result<Vec<Profile>, DomainError> {
        self.check_selection()?;
        Ok(self
            .profiles
            .read()
            .await
            .iter()
            .filter(|p| !p.has_embedding() && p.has_text())
            .take(limit)
            .cloned()
            .collect())
    }

    async fn find_all(&self, limit: usize) -> Result<Vec<Profile>, DomainError> {
        self.check_selection()?;
        Ok(self.profiles.read().await.iter().take(limit).cloned().collect())
    }

    async fn update_embedding(
        &self,
        id: Uuid,
        embedding: &[f32],
        updated_at: DateTime<Utc>,
    ) -> Result<bool, DomainError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(DomainError::Persistence("write rejected".to_string()));
        }

        let mut profiles = self.profiles.write().await;
        let Some(profile) = profiles.iter_mut().find(|p| p.id == id) else {
            return Ok(false);
        };

        profile.embedding = Some(embedding.to_vec());
        profile.embedding_updated_at = Some(updated_at);

        if let Ok(mut writes) = self.writes.lock() {
            writes.push(id);
        }
        Ok(true)
    }
}

/// Embedding provider returning vectors derived from the input bytes
pub struct StubEmbeddingService {
    dimensions: usize,
    fail_marker: Option<String>,
}

impl StubEmbeddingService {
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions,
            fail_marker: None,
        }
    }

    /// Fail with an upstream error for any input containing `marker`
    pub fn failing_on(mut self, marker: impl Into<String>) -> Self {
        self.fail_marker = Some(marker.into());
        self
    }
}

#[async_trait]
impl EmbeddingService for StubEmbeddingService {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, DomainError> {
        if let Some(marker) = &self.fail_marker {
            if text.contains(marker.as_str()) {
                return Err(DomainError::Upstream("rate limit exceeded".to_string()));
            }
        }

        let seed = text.bytes().fold(0u32, |acc, b| acc.wrapping_add(b as u32));
        Ok((0..self.dimensions)
            .map(|i| ((seed as usize + i) % 97) as f32 / 97.0)
            .collect())
    }
}
