//! Server module for building the HTTP API
//!
//! This module provides a `ServerBuilder` that wires configuration, sort
//! mappings, the route table and a repository into an axum router.

pub mod builder;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use builder::ServerBuilder;
pub use router::build_router;
pub use state::AppState;
