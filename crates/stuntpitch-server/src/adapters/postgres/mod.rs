//! PostgreSQL Repository Implementations

mod profile_repository;

pub use profile_repository::PgProfileRepository;
