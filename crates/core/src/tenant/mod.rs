//! Tenant identity, caller claims and ambient per-request context.
//!
//! This module provides the core types for binding every unit of work to
//! exactly one tenant:
//!
//! - [`TenantId`] - Opaque, case-normalized tenant identifier
//! - [`context`] - Ambient tenant storage scoped per logical unit of work
//! - [`CallerIdentity`] - The authenticated principal's permitted-tenant set
//! - [`EmptyClaimsPolicy`] - How an empty permitted set is interpreted
//!
//! # Design Philosophy
//!
//! The tenant for a request is established once, at the gate, and then read
//! ambiently by any code serving that request via [`context::current`]. The
//! storage flows with the logical call chain (tokio task-locals), never with
//! the worker thread, so pooled workers can serve interleaved requests
//! without any possibility of cross-tenant leakage.
//!
//! # Example
//!
//! ```
//! use akademi_core::tenant::{self, CallerIdentity, EmptyClaimsPolicy, TenantId};
//!
//! # tokio_test::block_on(async {
//! let identity = CallerIdentity::from_claims("user-1", None, Some("acme"), None);
//! let requested = TenantId::parse("Acme ").unwrap();
//!
//! identity
//!     .authorize_tenant(&requested, EmptyClaimsPolicy::default())
//!     .unwrap();
//!
//! tenant::scope(requested, async {
//!     assert_eq!(tenant::current().as_str(), "Acme");
//! })
//! .await;
//! # });
//! ```

pub mod context;
mod id;
mod identity;

pub use context::{current, in_scope, scope, scoped_spawn, set, try_current};
pub use id::{DEFAULT_TENANT, TenantId};
pub use identity::{CallerIdentity, EmptyClaimsPolicy};
