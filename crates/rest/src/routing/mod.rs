//! Route configuration.
//!
//! Defines all routes for the Akademi REST API and attaches the claims and
//! tenant-gate middleware in the required order (claims outermost, so the
//! gate sees the caller identity).

use axum::{
    Router,
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
};

use crate::handlers;
use crate::middleware::{claims_middleware, tenant_gate};
use crate::state::AppState;

/// Creates all Akademi REST API routes.
///
/// # Routes
///
/// ## Probes (tenant-exempt)
/// - `GET /health` - Health check
/// - `GET /_liveness` - Liveness probe
/// - `GET /_readiness` - Readiness probe
///
/// ## Tenant-scoped
/// - `GET /api/tenant` - Tenant in effect for the request
///
/// ## Headquarters (capability-gated)
/// - `POST /hq/licenses` - Create a license
/// - `GET /hq/licenses/export` - Export all licenses
/// - `POST /hq/licenses/import` - Import licenses
/// - `POST /hq/impersonate` - Switch the ambient tenant
pub fn create_routes(state: AppState) -> Router {
    Router::new()
        // Probes
        .route("/health", get(handlers::health::health_handler))
        .route("/_liveness", get(handlers::health::liveness_handler))
        .route("/_readiness", get(handlers::health::readiness_handler))
        // Tenant-scoped
        .route("/api/tenant", get(handlers::context::current_tenant_handler))
        // Headquarters
        .route("/hq/licenses", post(handlers::hq::create_license_handler))
        .route(
            "/hq/licenses/export",
            get(handlers::hq::export_licenses_handler),
        )
        .route(
            "/hq/licenses/import",
            post(handlers::hq::import_licenses_handler),
        )
        .route("/hq/impersonate", post(handlers::hq::impersonate_handler))
        // Middleware, innermost listed first
        .layer(from_fn_with_state(state.clone(), tenant_gate))
        .layer(from_fn(claims_middleware))
        // State
        .with_state(state)
}
