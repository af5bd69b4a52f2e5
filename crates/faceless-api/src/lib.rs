//! Axum HTTP API server for Faceless AI.
//!
//! This crate provides:
//! - Job submission and status polling over an in-memory job store
//! - A detached generation worker per job
//! - Rate limiting and security headers

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod render;
pub mod routes;
pub mod state;
pub mod store;
pub mod worker;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use render::{Renderer, SimulatedRenderer};
pub use routes::create_router;
pub use state::AppState;
pub use store::JobStore;
