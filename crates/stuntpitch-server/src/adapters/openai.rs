//! OpenAI Embedding Service - Vector generation for profile search
//!
//! Uses OpenAI's text-embedding-3-small model (1536 dimensions) by default.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use stuntpitch::{DomainError, EmbeddingConfig, EmbeddingService};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Embedding service backed by the OpenAI embeddings endpoint
#[derive(Clone)]
pub struct OpenAiEmbeddingService {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    dimensions: usize,
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    input: &'a str,
    model: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    dimensions: Option<usize>,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

impl OpenAiEmbeddingService {
    /// Create new embedding service with the configured model and request timeout
    pub fn new(api_key: String, config: &EmbeddingConfig) -> Result<Self, DomainError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| DomainError::Upstream(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: config.model.clone(),
            dimensions: config.dimensions,
        })
    }

    /// Point at an OpenAI-compatible endpoint
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Only the text-embedding-3 family accepts a `dimensions` override
    fn requested_dimensions(&self) -> Option<usize> {
        self.model
            .starts_with("text-embedding-3")
            .then_some(self.dimensions)
    }
}

#[async_trait]
impl EmbeddingService for OpenAiEmbeddingService {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, DomainError> {
        let request = EmbeddingRequest {
            input: text,
            model: &self.model,
            dimensions: self.requested_dimensions(),
        };

        let response = self
            .client
            .post(format!("{}/embeddings", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    DomainError::Upstream("Embedding request timed out".to_string())
                } else {
                    DomainError::Upstream(format!("Embedding request failed: {}", e))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(if status == StatusCode::TOO_MANY_REQUESTS {
                DomainError::Upstream(format!("OpenAI rate limit exceeded: {}", error_text))
            } else {
                DomainError::Upstream(format!("OpenAI API error ({}): {}", status, error_text))
            });
        }

        let embedding_response: EmbeddingResponse = response
            .json()
            .await
            .map_err(|e| DomainError::Upstream(format!("Malformed embedding response: {}", e)))?;

        embedding_response
            .data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .ok_or_else(|| DomainError::Upstream("No embedding returned".to_string()))
    }
}
