//! StuntPitch API Data Models
//!
//! - Embedding: generation triggers and their results

mod embedding;

pub use embedding::*;
