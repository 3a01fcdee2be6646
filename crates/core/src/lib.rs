//! Akademi Tenant Core
//!
//! This crate implements the tenant-context propagation and request-scoped
//! authorization core of the Akademi platform: the mechanism that binds
//! every unit of work to exactly one tenant (a franchise/branch), verifies
//! the caller's access to that tenant, and gates headquarters-level
//! privileged operations.
//!
//! # Architecture
//!
//! - [`tenant`] - Tenant identifier, caller claims, and the ambient
//!   per-request tenant context
//! - [`permissions`] - Headquarters capability matrix (role to capability
//!   lookup)
//! - [`audit`] - Audit trail contract for privileged operations
//! - [`error`] - Error taxonomy shared by the above
//!
//! # Design Philosophy
//!
//! The tenant for a request is established once, by the HTTP gate in the
//! REST crate, and then read ambiently by any code serving that request.
//! The storage flows with the logical call chain (tokio task-locals), not
//! with the worker thread, so concurrent requests on a pooled runtime can
//! never observe each other's tenant. There is no escape hatch and no
//! shared mutable map.
//!
//! # Quick Start
//!
//! ```
//! use akademi_core::permissions::{Capability, PermissionMatrix};
//! use akademi_core::tenant::{self, CallerIdentity, EmptyClaimsPolicy, TenantId};
//!
//! # tokio_test::block_on(async {
//! // Authorize the caller for the requested tenant.
//! let identity = CallerIdentity::from_claims("user-1", None, Some("acme"), None);
//! let requested = TenantId::parse("Acme").unwrap();
//! identity
//!     .authorize_tenant(&requested, EmptyClaimsPolicy::default())
//!     .unwrap();
//!
//! // Run the unit of work with the tenant installed.
//! tenant::scope(requested, async {
//!     assert_eq!(tenant::current().as_str(), "Acme");
//! })
//! .await;
//!
//! // Unknown roles hold no headquarters capabilities.
//! let matrix = PermissionMatrix::empty();
//! assert!(!matrix.allows(Some("EgitimYoneticisi"), Capability::Create));
//! # });
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod audit;
pub mod error;
pub mod permissions;
pub mod tenant;

pub use audit::{AuditEntry, AuditSink, MemoryAuditSink};
pub use error::{AuditError, TenantError};
pub use permissions::{Capability, PermissionMatrix, RoleCapabilities};
pub use tenant::{CallerIdentity, EmptyClaimsPolicy, TenantId};
