//! Embedding generation request/response DTOs

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use stuntpitch::{BatchReport, EmbeddingOutcome, JobOutcome};

/// Generate embeddings request
///
/// With `profileId` one profile is regenerated; otherwise up to `batchSize`
/// profiles are selected.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerateEmbeddingsRequest {
    pub profile_id: Option<String>,
    pub batch_size: Option<usize>,
}

/// Query for single-profile generation
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct GenerateEmbeddingQuery {
    /// Profile to regenerate
    pub profile_id: Option<String>,
}

/// Successful generation response
#[derive(Debug, Serialize, ToSchema)]
pub struct GenerateEmbeddingsResponse {
    pub success: bool,
    pub message: String,
    /// Present for batch runs only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<BatchSummary>,
}

/// Batch run counts
#[derive(Debug, Serialize, ToSchema)]
pub struct BatchSummary {
    pub selected: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub failures: Vec<FailureDetail>,
}

/// One profile the batch could not embed
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FailureDetail {
    pub profile_id: Uuid,
    pub reason: String,
}

/// Error body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

impl From<BatchReport> for BatchSummary {
    fn from(report: BatchReport) -> Self {
        Self {
            selected: report.selected,
            succeeded: report.succeeded,
            failed: report.failed,
            failures: report
                .failures
                .into_iter()
                .filter_map(|r| match r.outcome {
                    EmbeddingOutcome::Failed { reason } => Some(FailureDetail {
                        profile_id: r.profile_id,
                        reason,
                    }),
                    EmbeddingOutcome::Embedded { .. } => None,
                })
                .collect(),
        }
    }
}

impl From<JobOutcome> for GenerateEmbeddingsResponse {
    fn from(outcome: JobOutcome) -> Self {
        let message = outcome.message();
        let summary = match outcome {
            JobOutcome::Single { .. } => None,
            JobOutcome::Batch(report) => Some(report.into()),
        };

        Self {
            success: true,
            message,
            summary,
        }
    }
}
