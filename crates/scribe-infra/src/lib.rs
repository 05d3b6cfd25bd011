//! # Scribe Infrastructure
//!
//! Concrete implementations of the ports defined in `scribe-core`:
//! PostgreSQL repositories via SeaORM, an in-memory repository set used as
//! a fallback and in tests, and the Argon2/JWT auth services.

pub mod auth;
pub mod database;

pub use auth::{Argon2PasswordService, JwtSessionService, SessionConfig};
pub use database::{
    DatabaseConfig, InMemoryGroupRepository, InMemoryPostRepository, InMemoryStore,
    InMemoryUserRepository, PostgresGroupRepository, PostgresPostRepository,
    PostgresUserRepository, connect,
};
