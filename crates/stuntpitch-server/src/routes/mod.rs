//! StuntPitch API Routes
//!
//! - /embeddings/generate - Embedding generation (single profile or batch)
//! - /api-docs/openapi.json, /swagger-ui - OpenAPI documentation

pub mod embeddings;
pub mod swagger;
