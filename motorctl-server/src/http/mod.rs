//! HTTP server layer
//!
//! Axum server with:
//! - CORS restricted to the local frontend origin
//! - Request tracing
//! - Plain-text error responses

pub mod error;
pub mod routes;
pub mod server;

pub use error::ApiError;
pub use server::{
    build_router, run_server, serve, serve_from_env_file, AppState, ServerConfig, ServerError,
};
