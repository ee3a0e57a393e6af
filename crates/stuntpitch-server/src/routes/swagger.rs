//! OpenAPI Documentation
//!
//! Centralized API documentation using utoipa.

use utoipa::OpenApi;

use crate::models::{
    BatchSummary, ErrorResponse, FailureDetail, GenerateEmbeddingsRequest,
    GenerateEmbeddingsResponse,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::embeddings::generate_embeddings,
        super::embeddings::generate_profile_embedding,
    ),
    info(
        title = "StuntPitch API",
        version = "0.1.0",
        description = "Embedding generation for stunt performer profiles",
        license(name = "MIT"),
    ),
    servers(
        (url = "/", description = "Current server"),
    ),
    tags(
        (name = "Embeddings", description = "Semantic embedding generation for profile search"),
    ),
    components(
        schemas(
            GenerateEmbeddingsRequest,
            GenerateEmbeddingsResponse,
            BatchSummary,
            FailureDetail,
            ErrorResponse,
        )
    ),
)]
pub struct ApiDoc;
