//! # akademi-rest - Akademi REST API Implementation
//!
//! This crate provides the HTTP surface of the Akademi multi-tenant platform
//! core. It wires the tenant gate, caller-claims enforcement and the
//! headquarters license operations from [`akademi_core`] into an Axum
//! application.
//!
//! ## Features
//!
//! - **Tenant Gate**: Every non-exempt request must carry `X-Tenant-Id`; the
//!   gate installs the tenant as ambient context and echoes the effective
//!   tenant on the response
//! - **Claims Enforcement**: Callers restricted to a permitted-tenant set are
//!   rejected with 403 before any handler runs
//! - **Headquarters Operations**: License create/export/import and tenant
//!   impersonation, gated by a role-capability matrix
//! - **Audit Trail**: Every completed privileged operation records an audit
//!   entry; audit failure downgrades to a warning
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use akademi_core::audit::MemoryAuditSink;
//! use akademi_core::permissions::PermissionMatrix;
//! use akademi_rest::{ServerConfig, create_app};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::default();
//!     let app = create_app(
//!         PermissionMatrix::empty(),
//!         Arc::new(MemoryAuditSink::new()),
//!         config,
//!     );
//!
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:8080").await?;
//!     axum::serve(listener, app).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## HTTP Headers
//!
//! | Header | Direction | Description |
//! |--------|-----------|-------------|
//! | `X-Tenant-Id` | request | Tenant the request acts on (mandatory off the allowlist) |
//! | `X-Tenant-Id` | response | Tenant in effect when the response was produced |
//! | `X-Auth-Subject` | request | Authenticated subject, forwarded by the auth proxy |
//! | `X-Auth-Role` | request | Subject's role |
//! | `X-Auth-Tenant` | request | Single permitted-tenant claim |
//! | `X-Auth-Tenants` | request | Comma-separated permitted-tenant claim (takes precedence) |
//!
//! ## Error Handling
//!
//! All errors are returned as RFC 9457 problem-details payloads with
//! appropriate HTTP status codes:
//!
//! | HTTP Status | Title | Description |
//! |-------------|-------|-------------|
//! | 400 | Tenant missing | No usable tenant identifier on the request |
//! | 401 | Authentication required | No caller identity on a route that needs one |
//! | 403 | Tenant access denied | Claims do not permit the requested tenant |
//! | 403 | Forbidden | Role lacks a required capability |
//! | 500 | Internal error | Unexpected server failure |
//!
//! ## Architecture
//!
//! - [`error`] - Error types and problem-details generation
//! - [`config`] - Server configuration
//! - [`state`] - Application state (matrix, audit sink, licenses)
//! - [`licenses`] - In-memory license registry
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Axum middleware (claims, tenant gate)
//! - [`extractors`] - Axum extractors (caller identity)
//! - [`routing`] - Route configuration

// Enforce documentation
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod licenses;
pub mod middleware;
pub mod routing;
pub mod state;

// Re-export commonly used types
pub use config::ServerConfig;
pub use error::{RestError, RestResult};
pub use state::AppState;

use std::sync::Arc;

use akademi_core::audit::AuditSink;
use akademi_core::permissions::PermissionMatrix;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

/// Creates the Axum application.
///
/// This function sets up the complete REST API with all handlers,
/// middleware, and configuration.
///
/// # Arguments
///
/// * `matrix` - Headquarters role-capability matrix
/// * `audit` - Destination for audit entries
/// * `config` - Server configuration
///
/// # Example
///
/// ```rust
/// use akademi_core::audit::MemoryAuditSink;
/// use akademi_core::permissions::PermissionMatrix;
/// use akademi_rest::{ServerConfig, create_app};
/// use std::sync::Arc;
///
/// let app = create_app(
///     PermissionMatrix::empty(),
///     Arc::new(MemoryAuditSink::new()),
///     ServerConfig::for_testing(),
/// );
/// ```
pub fn create_app(
    matrix: PermissionMatrix,
    audit: Arc<dyn AuditSink>,
    config: ServerConfig,
) -> Router {
    info!(
        configured_roles = matrix.len(),
        "Creating REST API server"
    );

    // Create application state
    let state = AppState::new(matrix, audit, config.clone());

    // Build the router with all routes and the tenant middleware
    let router = routing::create_routes(state);

    // Build middleware stack
    let service_builder = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            axum::http::StatusCode::REQUEST_TIMEOUT,
            std::time::Duration::from_secs(config.request_timeout),
        ));

    // Add CORS if enabled
    let router = if config.enable_cors {
        let cors = build_cors_layer(&config);
        router.layer(cors)
    } else {
        router
    };

    // Apply remaining middleware
    router.layer(service_builder)
}

/// Builds the CORS layer based on configuration.
fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let mut cors = CorsLayer::new();

    // Configure origins
    if config.cors_origins == "*" {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<_> = config
            .cors_origins
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    // Configure methods
    if config.cors_methods == "*" {
        cors = cors.allow_methods(Any);
    } else {
        let methods: Vec<_> = config
            .cors_methods
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_methods(methods);
    }

    // Configure headers
    if config.cors_headers == "*" {
        cors = cors.allow_headers(Any);
    } else {
        let headers: Vec<_> = config
            .cors_headers
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_headers(headers);
    }

    cors
}

/// Initializes the tracing subscriber for logging.
///
/// This should be called once at application startup.
///
/// # Arguments
///
/// * `level` - The log level (error, warn, info, debug, trace)
pub fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("akademi={},tower_http=debug", level)));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}
