//! Embedding Configuration
//!
//! Explicit settings handed to [`crate::EmbeddingCoordinator`] at construction.
//! Adapters build it from whatever secret source they have (Shuttle secrets,
//! process environment, CLI config file) through [`EmbeddingConfig::from_lookup`].

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;

use crate::domain::{DomainError, SelectionPolicy};

pub const DEFAULT_MODEL: &str = "text-embedding-3-small";
pub const DEFAULT_DIMENSIONS: usize = 1536;
pub const DEFAULT_CHUNK_SIZE: usize = 5;
pub const DEFAULT_BATCH_SIZE: usize = 10;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Coordinator and provider settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Provider model name
    pub model: String,
    /// Fixed vector length every written embedding must have
    pub dimensions: usize,
    pub selection: SelectionPolicy,
    /// Profiles processed back to back before the inter-chunk pause
    pub chunk_size: usize,
    #[serde(rename = "chunk_delay_ms", with = "millis")]
    pub chunk_delay: Duration,
    #[serde(rename = "request_timeout_secs", with = "secs")]
    pub request_timeout: Duration,
    /// Batch size used when a trigger does not name one
    pub default_batch_size: usize,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            dimensions: DEFAULT_DIMENSIONS,
            selection: SelectionPolicy::default(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            chunk_delay: Duration::ZERO,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            default_batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl EmbeddingConfig {
    /// Build from a key lookup, starting from defaults.
    ///
    /// Keys: `EMBEDDING_MODEL`, `EMBEDDING_DIMENSIONS`, `EMBEDDING_SELECTION`,
    /// `EMBEDDING_CHUNK_SIZE`, `EMBEDDING_CHUNK_DELAY_MS`,
    /// `EMBEDDING_TIMEOUT_SECS`, `EMBEDDING_DEFAULT_BATCH_SIZE`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, DomainError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::default().overridden_by(lookup)
    }

    /// Apply lookup keys on top of an existing config (e.g. one read from a file)
    pub fn overridden_by<F>(self, lookup: F) -> Result<Self, DomainError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = self;

        if let Some(model) = lookup("EMBEDDING_MODEL").filter(|m| !m.trim().is_empty()) {
            config.model = model.trim().to_string();
        }
        if let Some(dimensions) = parse_key(&lookup, "EMBEDDING_DIMENSIONS")? {
            config.dimensions = dimensions;
        }
        if let Some(selection) = parse_key(&lookup, "EMBEDDING_SELECTION")? {
            config.selection = selection;
        }
        if let Some(chunk_size) = parse_key(&lookup, "EMBEDDING_CHUNK_SIZE")? {
            config.chunk_size = chunk_size;
        }
        if let Some(ms) = parse_key::<u64, _>(&lookup, "EMBEDDING_CHUNK_DELAY_MS")? {
            config.chunk_delay = Duration::from_millis(ms);
        }
        if let Some(secs) = parse_key::<u64, _>(&lookup, "EMBEDDING_TIMEOUT_SECS")? {
            config.request_timeout = Duration::from_secs(secs);
        }
        if let Some(batch) = parse_key(&lookup, "EMBEDDING_DEFAULT_BATCH_SIZE")? {
            config.default_batch_size = batch;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.dimensions == 0 {
            return Err(DomainError::Validation(
                "Embedding dimensions must be at least 1".to_string(),
            ));
        }
        if self.chunk_size == 0 {
            return Err(DomainError::Validation(
                "Chunk size must be at least 1".to_string(),
            ));
        }
        if self.default_batch_size == 0 {
            return Err(DomainError::Validation(
                "Default batch size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

fn parse_key<T, F>(lookup: &F, key: &str) -> Result<Option<T>, DomainError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| DomainError::Validation(format!("Invalid {}='{}': {}", key, raw, e))),
        _ => Ok(None),
    }
}

mod millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_millis(u64::deserialize(deserializer)?))
    }
}

mod secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_secs(u64::deserialize(deserializer)?))
    }
}
