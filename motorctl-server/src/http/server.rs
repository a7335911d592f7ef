//! Axum server setup
//!
//! Server skeleton with:
//! - CORS for the local frontend origin, with credentials
//! - Tracing middleware
//! - No graceful shutdown: the listener runs for the process lifetime

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use axum::http::{header, HeaderValue, Method};
use axum::Router;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::routes;
use crate::config::{load_env_file, ConfigError, DbConfig};
use crate::db::{self, MotorStore, PgMotorStore};

/// The only origin allowed to call the API from a browser.
pub const ALLOWED_ORIGIN: &str = "http://localhost:3000";

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to (default: 0.0.0.0:8080)
    pub bind_addr: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn MotorStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn MotorStore>) -> Self {
        Self { store }
    }
}

/// CORS policy applied to every response.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(HeaderValue::from_static(ALLOWED_ORIGIN))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
}

/// Build the application router with all routes
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(routes::motors::router())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer()),
        )
        .with_state(Arc::new(state))
}

/// Run the HTTP server over an existing store.
///
/// # Example
///
/// ```ignore
/// let pool = connect(&DbConfig::from_env()?).await?;
/// run_server(Arc::new(PgMotorStore::new(pool)), ServerConfig::default()).await?;
/// ```
pub async fn run_server(store: Arc<dyn MotorStore>, config: ServerConfig) -> Result<(), ServerError> {
    let app = build_router(AppState::new(store));

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Server running on {}", config.bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}

/// Connect to PostgreSQL, then serve until the process exits.
pub async fn serve(db_config: &DbConfig, config: ServerConfig) -> Result<(), ServerError> {
    let pool = db::connect(db_config).await?;
    run_server(Arc::new(PgMotorStore::new(pool)), config).await
}

/// Load `env_file`, read the `DB_*` descriptor, then [`serve`].
pub async fn serve_from_env_file(env_file: &Path, config: ServerConfig) -> Result<(), ServerError> {
    load_env_file(env_file)?;
    let db_config = DbConfig::from_env()?;
    tracing::debug!(env_file = %env_file.display(), "Database configuration loaded");
    serve(&db_config, config).await
}

/// Server error type
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to connect to database: {0}")]
    Database(#[from] sqlx::Error),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}
