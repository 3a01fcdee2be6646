//! Middleware for the Akademi REST API.
//!
//! Two layers run on every request, outermost first:
//!
//! - [`claims`] - reads forwarded identity headers into a [`CallerIdentity`]
//!   request extension
//! - [`tenant_gate`] - establishes the request's tenant, enforces the
//!   caller's permitted-tenant claims, and echoes the effective tenant on
//!   the response
//!
//! [`CallerIdentity`]: akademi_core::tenant::CallerIdentity

pub mod claims;
pub mod tenant_gate;

pub use claims::{
    X_AUTH_ROLE, X_AUTH_SUBJECT, X_AUTH_TENANT, X_AUTH_TENANTS, claims_middleware,
};
pub use tenant_gate::{X_TENANT_ID, tenant_gate};
