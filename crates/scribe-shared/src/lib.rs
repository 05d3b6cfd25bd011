//! # Scribe Shared
//!
//! Form types submitted by the browser and their validation, shared between
//! the handlers and the test suite.

pub mod forms;

pub use forms::{LoginForm, PostForm, PostFormErrors, PostInput};
