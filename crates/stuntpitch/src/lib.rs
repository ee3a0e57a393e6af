//! StuntPitch Domain Library
//!
//! Core domain types and interfaces for the StuntPitch performer directory.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain/`): Pure business entities and logic
//!   - `entities/`: Core domain models (Profile)
//!   - `value_objects/`: Immutable value types (SelectionPolicy, EmbeddingJob, BatchReport)
//!   - `services/`: Domain services (EmbeddingCoordinator)
//!   - `errors/`: Domain-specific error types
//!
//! - **Ports** (`ports/`): Abstract interfaces (traits)
//!   - `repositories/`: Data access interfaces
//!   - `services/`: External service interfaces
//!
//! - **Config** (`config`): Explicit embedding configuration handed to the coordinator
//!
//! # Usage
//!
//! ```rust,ignore
//! use stuntpitch::{EmbeddingConfig, EmbeddingCoordinator};
//!
//! let coordinator = EmbeddingCoordinator::new(repo, embedder, EmbeddingConfig::default());
//! let report = coordinator.generate_all(10).await?;
//! ```

pub mod config;
pub mod domain;
pub mod ports;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

// Re-export commonly used types
pub use config::EmbeddingConfig;
pub use domain::{
    BatchReport, DomainError, EmbeddingCoordinator, EmbeddingJob, EmbeddingOutcome,
    EmbeddingResult, JobOutcome, Profile, SelectionPolicy,
};
pub use ports::{EmbeddingService, ProfileRepository};
