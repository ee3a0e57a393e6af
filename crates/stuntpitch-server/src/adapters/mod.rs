//! Infrastructure Adapters
//!
//! Implementations of domain ports for external systems.

pub mod openai;
pub mod postgres;

// Re-exports
pub use openai::OpenAiEmbeddingService;
pub use postgres::PgProfileRepository;
