//! Tenant context introspection handler.

use akademi_core::tenant;
use axum::{Json, http::StatusCode, response::{IntoResponse, Response}};
use tracing::debug;

use crate::error::RestResult;

/// Handler reporting the tenant in effect for the current request.
///
/// Reads the ambient tenant installed by the gate, so the body always agrees
/// with the `X-Tenant-Id` response header (both reflect impersonation).
///
/// # HTTP Request
///
/// `GET [base]/api/tenant`
pub async fn current_tenant_handler() -> RestResult<Response> {
    let tenant = tenant::current();
    debug!(tenant_id = %tenant, "Reporting current tenant");

    let response = serde_json::json!({
        "tenant": tenant.as_str(),
    });

    Ok((StatusCode::OK, Json(response)).into_response())
}
