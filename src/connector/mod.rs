//! # Connector Layer
//!
//! External integrations implementing application interfaces:
//! - Completions (OpenAI chat completions API, local mock)
//! - Session storage (in-memory, expires after an idle TTL)
//! - Web UI (axum routes, controllers, page template)

pub mod adapter;
pub mod api;

pub use adapter::*;
pub use api::{Container, ContainerConfig, Router};
