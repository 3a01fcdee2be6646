//! Tenant gate middleware.
//!
//! The gate is the single place where a request's tenant is established. For
//! every non-exempt request it:
//!
//! 1. Reads the `X-Tenant-Id` header and rejects requests without one (400).
//! 2. Checks the caller's permitted-tenant claims and rejects mismatches (403),
//!    before any handler or collaborator runs.
//! 3. Installs the tenant as the ambient context for the rest of the request.
//! 4. Echoes the effective tenant back on the response, reflecting any change
//!    a handler made (impersonation).
//!
//! Exempt paths (health probes, auth endpoints, static tooling) and CORS
//! preflight requests pass through untouched.

use akademi_core::tenant::{self, CallerIdentity, TenantId};
use axum::{
    extract::{Request, State},
    http::{HeaderValue, Method, header::HeaderName},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::{debug, warn};

use crate::error::RestError;
use crate::state::AppState;

/// Header name for tenant identification.
pub static X_TENANT_ID: HeaderName = HeaderName::from_static("x-tenant-id");

/// Reads the raw tenant header from a request, if present.
pub fn raw_tenant_header(request: &Request) -> Option<&str> {
    request
        .headers()
        .get(&X_TENANT_ID)
        .and_then(|v| v.to_str().ok())
}

/// Middleware function for the tenant gate.
///
/// Use with `axum::middleware::from_fn_with_state`, layered inside the
/// claims middleware so the caller identity extension is already present.
pub async fn tenant_gate(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    // Preflight never carries application headers; CORS answers it.
    if request.method() == Method::OPTIONS {
        return next.run(request).await;
    }

    if state.config().is_allowlisted(request.uri().path()) {
        debug!(path = request.uri().path(), "Path exempt from tenant gate");
        return next.run(request).await;
    }

    let tenant = match TenantId::parse(raw_tenant_header(&request).unwrap_or("")) {
        Ok(tenant) => tenant,
        Err(err) => {
            debug!(path = request.uri().path(), "Request without tenant rejected");
            return RestError::from(err).into_response();
        }
    };

    // Claim check happens before the handler or any collaborator runs.
    if let Some(identity) = request.extensions().get::<CallerIdentity>() {
        if let Err(err) =
            identity.authorize_tenant(&tenant, state.config().empty_claims_policy())
        {
            warn!(
                subject = identity.subject(),
                requested_tenant = %tenant,
                "Tenant access denied"
            );
            return RestError::from(err).into_response();
        }
    }

    debug!(tenant_id = %tenant, "Tenant installed for request");

    tenant::scope(tenant, async move {
        let mut response = next.run(request).await;

        // Echo the tenant in effect at response time, not the one requested;
        // impersonation may have changed it.
        let effective = tenant::current();
        if let Ok(value) = HeaderValue::from_str(effective.as_str()) {
            response.headers_mut().insert(X_TENANT_ID.clone(), value);
        }
        response
    })
    .await
}
