//! Database-backed repositories.
//!
//! The PostgreSQL implementations are the production path; the in-memory
//! set backs the server when no DATABASE_URL is configured and is what the
//! handler tests run against.

mod connections;
mod memory;
mod postgres_base;
mod postgres_repo;

pub mod entity;

pub use connections::{DatabaseConfig, connect};
pub use memory::{
    InMemoryGroupRepository, InMemoryPostRepository, InMemoryStore, InMemoryUserRepository,
};
pub use postgres_repo::{PostgresGroupRepository, PostgresPostRepository, PostgresUserRepository};

#[cfg(test)]
mod tests;
