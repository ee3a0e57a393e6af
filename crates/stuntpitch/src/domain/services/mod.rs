//! Domain Services
//!
//! Workflows that coordinate entities through ports.

mod embedding_coordinator;

pub use embedding_coordinator::*;
