//! Shared types for the cooperative shop backend
//!
//! Error codes and response envelopes, wire models and small time helpers
//! used by coop-server and mirrored by the web client.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};
