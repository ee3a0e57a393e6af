//! Value Objects
//!
//! Immutable value types used by the embedding workflow.

mod embedding_job;
mod embedding_result;
mod selection_policy;

pub use embedding_job::*;
pub use embedding_result::*;
pub use selection_policy::*;
