//! Error types for the tenant core.
//!
//! This module defines the error taxonomy shared by the tenant resolution,
//! authorization and audit components. Transport-level mapping (HTTP status
//! codes, problem payloads) lives in the REST crate.

use thiserror::Error;

use crate::tenant::TenantId;

/// Errors raised while resolving or authorizing a tenant.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TenantError {
    /// The request did not carry a tenant identifier, or the identifier was
    /// blank after trimming. Maps to a client error (400).
    #[error("tenant identifier missing from request")]
    Missing,

    /// The caller's permitted-tenant set does not include the requested
    /// tenant. Maps to an authorization error (403).
    #[error("access denied: caller {subject} is not permitted to act on tenant {tenant_id}")]
    AccessDenied {
        /// Subject of the authenticated caller.
        subject: String,
        /// The tenant the caller asked for.
        tenant_id: TenantId,
    },
}

/// Errors raised by audit sinks.
///
/// Audit failures are non-terminal: they never invalidate the outcome of the
/// privileged action they document. See [`crate::audit::record_or_warn`].
#[derive(Error, Debug, Clone)]
pub enum AuditError {
    /// The sink failed to accept the entry.
    #[error("audit write failed: {message}")]
    WriteFailed {
        /// Description of the underlying failure.
        message: String,
    },
}
