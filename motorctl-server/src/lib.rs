//! motorctl-server: HTTP register for dispatched motors
//!
//! Two endpoints over a single `motors` table:
//! - `POST /register` inserts one record
//! - `GET /fetch` selects records by serial number and/or party name

pub mod config;
pub mod db;
pub mod http;
pub mod models;

pub use config::{load_env_file, ConfigError, DbConfig};
pub use db::{connect, DbError, MemoryMotorStore, MotorStore, PgMotorStore};
pub use http::{
    build_router, run_server, serve, serve_from_env_file, ApiError, AppState, ServerConfig,
    ServerError,
};
pub use models::{Motor, MotorFilter, ValidationError};
