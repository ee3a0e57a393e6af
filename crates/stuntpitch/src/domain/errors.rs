//! Domain Errors
//!
//! Error types for domain operations.

use thiserror::Error;
use uuid::Uuid;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: String, id: String },

    #[error("Validation error: {0}")]
    Validation(String),

    /// Embedding provider failure (network, rate limit, malformed response)
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// Profile store failure (selection query or write-back)
    #[error("Persistence error: {0}")]
    Persistence(String),
}

impl DomainError {
    pub fn not_found<T: AsRef<str>>(entity_type: T, id: Uuid) -> Self {
        Self::NotFound {
            entity_type: entity_type.as_ref().to_string(),
            id: id.to_string(),
        }
    }

    /// Whether the error was caused by the caller's input rather than a collaborator
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::Validation(_))
    }
}
