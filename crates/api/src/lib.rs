//! HTTP API and APR orchestration.
//!
//! This crate exposes the farm APR computation over HTTP:
//! - `AprService` sequencing price, chain and arithmetic steps
//! - Routes for the default pool, any configured pool and health
//! - Error to status code mapping

/// Error types.
pub mod error;
/// Request handlers.
pub mod handlers;
/// API request/response models.
pub mod models;
/// Route definitions.
pub mod routes;
/// Server configuration and startup.
pub mod server;
/// Service layer for APR computation.
pub mod services;
/// Application state.
pub mod state;

#[cfg(test)]
pub(crate) mod testing;

pub use error::ApiError;
pub use routes::create_router;
pub use server::{ApiServer, ServerConfig};
pub use services::AprService;
pub use state::AppState;
