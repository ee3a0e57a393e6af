//! SelectionPolicy - Which profiles a batch run picks up

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::domain::errors::DomainError;

/// Profile selection policy for batch embedding generation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SelectionPolicy {
    /// Only profiles without an embedding (re-runs resume where they stopped)
    #[default]
    MissingOnly,
    /// Every profile, regenerating existing embeddings
    All,
}

impl std::fmt::Display for SelectionPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SelectionPolicy::MissingOnly => write!(f, "missing_only"),
            SelectionPolicy::All => write!(f, "all"),
        }
    }
}

impl FromStr for SelectionPolicy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "missing_only" | "missing" => Ok(SelectionPolicy::MissingOnly),
            "all" => Ok(SelectionPolicy::All),
            other => Err(DomainError::Validation(format!(
                "Unknown selection policy '{}' (expected 'missing_only' or 'all')",
                other
            ))),
        }
    }
}
