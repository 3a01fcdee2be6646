//! Caller identity middleware.
//!
//! Reads the identity headers forwarded by the authentication proxy after
//! token validation and attaches a [`CallerIdentity`] to the request as an
//! extension. Token issuance and verification happen upstream; this layer
//! only trusts what the proxy forwarded.
//!
//! Requests without a subject header pass through anonymously (no extension);
//! the tenant gate then applies no claim restriction to them.

use akademi_core::tenant::CallerIdentity;
use axum::{
    extract::Request,
    http::{HeaderMap, header::HeaderName},
    middleware::Next,
    response::Response,
};
use tracing::debug;

/// Header carrying the authenticated subject.
pub static X_AUTH_SUBJECT: HeaderName = HeaderName::from_static("x-auth-subject");

/// Header carrying the subject's role.
pub static X_AUTH_ROLE: HeaderName = HeaderName::from_static("x-auth-role");

/// Header carrying a single permitted-tenant claim.
pub static X_AUTH_TENANT: HeaderName = HeaderName::from_static("x-auth-tenant");

/// Header carrying a comma-separated multi-tenant claim.
///
/// Takes precedence over [`X_AUTH_TENANT`] when both are present.
pub static X_AUTH_TENANTS: HeaderName = HeaderName::from_static("x-auth-tenants");

fn header_str<'h>(headers: &'h HeaderMap, name: &HeaderName) -> Option<&'h str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

/// Builds a [`CallerIdentity`] from the forwarded identity headers.
///
/// Returns `None` when no subject header is present (anonymous request).
pub fn identity_from_headers(headers: &HeaderMap) -> Option<CallerIdentity> {
    let subject = header_str(headers, &X_AUTH_SUBJECT)?;
    let role = header_str(headers, &X_AUTH_ROLE).map(String::from);
    let tenant_claim = header_str(headers, &X_AUTH_TENANT);
    let tenants_claim = header_str(headers, &X_AUTH_TENANTS);

    Some(CallerIdentity::from_claims(
        subject,
        role,
        tenant_claim,
        tenants_claim,
    ))
}

/// Middleware function for caller identity extraction.
///
/// This can be used with `axum::middleware::from_fn`. It must run before the
/// tenant gate so the gate can consult the permitted-tenant set.
pub async fn claims_middleware(mut request: Request, next: Next) -> Response {
    if let Some(identity) = identity_from_headers(request.headers()) {
        debug!(subject = identity.subject(), "Attached caller identity");
        request.extensions_mut().insert(identity);
    }

    next.run(request).await
}
