//! Health check endpoint handlers.
//!
//! Provides simple health check endpoints for monitoring and load balancers.
//! All of these paths sit on the tenant-gate allowlist: probes carry no
//! tenant header.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::debug;

use crate::error::RestResult;
use crate::state::AppState;

/// Handler for the health check endpoint.
///
/// Returns a simple health status, useful for load balancers and
/// monitoring systems.
///
/// # HTTP Request
///
/// `GET [base]/health`
///
/// # Response
///
/// - `200 OK` - Server is healthy
pub async fn health_handler() -> RestResult<Response> {
    debug!("Processing health check request");

    let health_response = serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    });

    Ok((StatusCode::OK, Json(health_response)).into_response())
}

/// Handler for the liveness probe.
///
/// # HTTP Request
///
/// `GET [base]/_liveness`
pub async fn liveness_handler() -> impl IntoResponse {
    StatusCode::OK
}

/// Handler for the readiness probe.
///
/// Reports whether the permission matrix was loaded, so a misconfigured
/// deployment shows up before it denies every headquarters operation.
///
/// # HTTP Request
///
/// `GET [base]/_readiness`
pub async fn readiness_handler(State(state): State<AppState>) -> RestResult<Response> {
    debug!("Processing readiness check request");

    let response = serde_json::json!({
        "status": "ready",
        "checks": {
            "permission_matrix": if state.matrix().is_empty() { "empty" } else { "ok" },
            "configured_roles": state.matrix().len(),
        }
    });

    Ok((StatusCode::OK, Json(response)).into_response())
}
