//! # Domain Layer
//!
//! Conversation state, prompt messages, and the error taxonomy.
//! This layer is independent of the web framework and the completion vendor.

pub mod error;
pub mod models;

pub use error::*;
pub use models::*;
