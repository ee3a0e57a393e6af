//! Repository Ports
//!
//! Abstract interfaces for data persistence.

mod profile_repository;

pub use profile_repository::*;
