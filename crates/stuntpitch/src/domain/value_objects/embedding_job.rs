//! EmbeddingJob - Unit of work for one coordinator invocation

use serde::Serialize;
use uuid::Uuid;

use super::BatchReport;

/// What a single invocation should process. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbeddingJob {
    /// Regenerate one profile regardless of its current embedding
    Single(Uuid),
    /// Process up to `batch_size` profiles picked by the selection policy
    Batch { batch_size: usize },
}

impl EmbeddingJob {
    /// Build a job from the optional trigger parameters both entry points accept
    pub fn from_params(profile_id: Option<Uuid>, batch_size: usize) -> Self {
        match profile_id {
            Some(id) => EmbeddingJob::Single(id),
            None => EmbeddingJob::Batch { batch_size },
        }
    }
}

/// Result of running an [`EmbeddingJob`]
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum JobOutcome {
    Single { profile_id: Uuid, dimensions: usize },
    Batch(BatchReport),
}

impl JobOutcome {
    /// Human readable summary used by the HTTP and CLI adapters
    pub fn message(&self) -> String {
        match self {
            JobOutcome::Single { profile_id, .. } => {
                format!("Embedding generated for profile {}", profile_id)
            }
            JobOutcome::Batch(report) if report.failed == 0 => {
                "All embeddings generated successfully".to_string()
            }
            JobOutcome::Batch(report) => format!(
                "Generated {} of {} embeddings ({} failed)",
                report.succeeded, report.selected, report.failed
            ),
        }
    }
}
