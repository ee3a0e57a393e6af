//! EmbeddingResult / BatchReport - Per-invocation outcome aggregation

use serde::Serialize;
use uuid::Uuid;

/// Outcome for one profile
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EmbeddingOutcome {
    Embedded { dimensions: usize },
    Failed { reason: String },
}

/// Profile id paired with its outcome
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmbeddingResult {
    pub profile_id: Uuid,
    #[serde(flatten)]
    pub outcome: EmbeddingOutcome,
}

impl EmbeddingResult {
    pub fn embedded(profile_id: Uuid, dimensions: usize) -> Self {
        Self {
            profile_id,
            outcome: EmbeddingOutcome::Embedded { dimensions },
        }
    }

    pub fn failed(profile_id: Uuid, reason: impl Into<String>) -> Self {
        Self {
            profile_id,
            outcome: EmbeddingOutcome::Failed {
                reason: reason.into(),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.outcome, EmbeddingOutcome::Embedded { .. })
    }
}

/// Success/failure counts for one batch run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchReport {
    /// Profiles returned by the selection query
    pub selected: usize,
    pub succeeded: usize,
    pub failed: usize,
    /// Only failed results are kept; vectors are never held here
    pub failures: Vec<EmbeddingResult>,
}

impl BatchReport {
    pub fn new(selected: usize) -> Self {
        Self {
            selected,
            ..Default::default()
        }
    }

    pub fn record(&mut self, result: EmbeddingResult) {
        if result.is_success() {
            self.succeeded += 1;
        } else {
            self.failed += 1;
            self.failures.push(result);
        }
    }

    pub fn processed(&self) -> usize {
        self.succeeded + self.failed
    }
}
