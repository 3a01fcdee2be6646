//! Akademi Server
//!
//! The multi-tenant course and franchise platform server.

use std::sync::Arc;

use akademi_core::audit::MemoryAuditSink;
use akademi_core::permissions::PermissionMatrix;
use anyhow::Context;
use clap::Parser;
use akademi_rest::{ServerConfig, create_app, init_logging};
use tracing::{info, warn};

/// Loads the role-capability matrix from the configured JSON file.
///
/// A server without a matrix file runs with an empty matrix, which denies
/// every headquarters capability.
fn load_permission_matrix(config: &ServerConfig) -> anyhow::Result<PermissionMatrix> {
    match &config.permission_matrix {
        Some(path) => {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read permission matrix from {}", path))?;
            let matrix: PermissionMatrix = serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse permission matrix from {}", path))?;
            info!(path = %path, roles = matrix.len(), "Loaded permission matrix");
            Ok(matrix)
        }
        None => {
            warn!("No permission matrix configured; all headquarters operations will be denied");
            Ok(PermissionMatrix::empty())
        }
    }
}

/// Starts the Axum HTTP server.
async fn serve(app: axum::Router, config: &ServerConfig) -> anyhow::Result<()> {
    let addr = config.socket_addr();
    info!(address = %addr, "Server listening");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::parse();
    init_logging(&config.log_level);

    if let Err(errors) = config.validate() {
        for error in &errors {
            eprintln!("Configuration error: {}", error);
        }
        std::process::exit(1);
    }

    info!(
        port = config.port,
        host = %config.host,
        deny_empty_claims = config.deny_empty_claims,
        "Starting Akademi server"
    );

    let matrix = load_permission_matrix(&config)?;
    let audit = Arc::new(MemoryAuditSink::new());

    let app = create_app(matrix, audit, config.clone());
    serve(app, &config).await
}
