//! # Scribe Core
//!
//! The domain layer of the Scribe blog application.
//! This crate contains pure business logic with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod pagination;
pub mod ports;

pub use error::RepoError;
pub use pagination::{PAGE_SIZE, Page};
