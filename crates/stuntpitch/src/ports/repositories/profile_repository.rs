//! Profile Repository Port
//!
//! Narrow view of the profile store needed for embedding generation.
//! Profiles are never created or deleted through this interface.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{errors::DomainError, Profile};

/// Repository interface for Profile entities
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Find a Profile by ID
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Profile>, DomainError>;

    /// Profiles without an embedding, at most `limit`, in store order.
    ///
    /// Profiles with no text to embed are left out; they could never leave
    /// this selection and would starve the rest of the queue.
    async fn find_missing_embedding(&self, limit: usize) -> Result<Vec<Profile>, DomainError>;

    /// Any profiles, at most `limit`, in store order
    async fn find_all(&self, limit: usize) -> Result<Vec<Profile>, DomainError>;

    /// Replace the embedding and its timestamp. Returns false when no row matched.
    async fn update_embedding(
        &self,
        id: Uuid,
        embedding: &[f32],
        updated_at: DateTime<Utc>,
    ) -> Result<bool, DomainError>;
}
