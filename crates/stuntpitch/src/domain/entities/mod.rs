//! Domain Entities
//!
//! Pure domain models without infrastructure dependencies.
//! - Profile: A stunt performer's directory record

mod profile;

pub use profile::*;
