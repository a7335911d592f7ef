//! HTTP server command
//!
//! Loads the environment file, reads the database descriptor, connects and
//! serves `/register` and `/fetch` on port 8080 until the process exits.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use motorctl_server::{serve_from_env_file, ServerConfig};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Environment file holding DB_HOST, DB_PORT, DB_USER, DB_PASSWORD, DB_NAME
    #[arg(long, env = "MOTORCTL_ENV_FILE", default_value = ".env")]
    pub env_file: PathBuf,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let config = ServerConfig::default();

    tracing::info!(env_file = %args.env_file.display(), "Starting motorctl server on {}", config.bind_addr);

    // Run server (blocks until the process is stopped)
    serve_from_env_file(&args.env_file, config)
        .await
        .context("Server startup failed")?;

    Ok(())
}
