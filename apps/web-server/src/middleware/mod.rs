//! Authentication extractors and HTML error responses.

pub mod auth;
pub mod error;
