//! Ambient tenant context, scoped per logical unit of work.
//!
//! Any code serving a request can ask "which tenant am I operating on"
//! through [`current`] without the tenant being threaded through every
//! function signature. The storage is a tokio task-local slot installed by
//! [`scope`], so it flows with the logical call chain rather than with the
//! worker thread: two concurrently executing requests never observe each
//! other's value, even when the runtime multiplexes them over a shared
//! thread pool.
//!
//! The slot expires automatically when the scoped future completes; no
//! explicit teardown is required.
//!
//! # Example
//!
//! ```
//! use akademi_core::tenant::{self, TenantId};
//!
//! # tokio_test::block_on(async {
//! tenant::scope(TenantId::new("acme"), async {
//!     assert_eq!(tenant::current().as_str(), "acme");
//!
//!     // Last write wins within the same flow.
//!     tenant::set(TenantId::new("globex"));
//!     assert_eq!(tenant::current().as_str(), "globex");
//! })
//! .await;
//!
//! // Outside any flow the default sentinel is reported.
//! assert!(tenant::current().is_default());
//! # });
//! ```

use std::future::Future;
use std::sync::Arc;

use parking_lot::RwLock;
use tokio::task::JoinHandle;

use super::id::TenantId;

tokio::task_local! {
    static CURRENT_TENANT: Arc<RwLock<TenantId>>;
}

/// Runs `future` with `tenant` installed as the ambient tenant.
///
/// The value is visible to the future and to everything it awaits,
/// including concurrent sub-operations joined within it. It expires when
/// the future completes.
pub async fn scope<F>(tenant: TenantId, future: F) -> F::Output
where
    F: Future,
{
    CURRENT_TENANT
        .scope(Arc::new(RwLock::new(tenant)), future)
        .await
}

/// Overwrites the ambient tenant for the current unit of work.
///
/// Last write wins within one flow. Has no effect outside a flow (when no
/// [`scope`] is active) — there is no unit of work to attach the value to.
pub fn set(tenant: TenantId) {
    let _ = CURRENT_TENANT.try_with(|slot| *slot.write() = tenant);
}

/// Returns the ambient tenant, or the default sentinel when no flow is
/// active.
pub fn current() -> TenantId {
    try_current().unwrap_or_else(TenantId::default_tenant)
}

/// Returns the ambient tenant, or `None` when no flow is active.
pub fn try_current() -> Option<TenantId> {
    CURRENT_TENANT.try_with(|slot| slot.read().clone()).ok()
}

/// Returns `true` when called from within an active tenant scope.
pub fn in_scope() -> bool {
    CURRENT_TENANT.try_with(|_| ()).is_ok()
}

/// Spawns a tokio task that shares the current flow's tenant slot.
///
/// `tokio::spawn` starts an independent task with no ambient context; use
/// this for sub-operations that are causally part of the same unit of work
/// (e.g. parallel data fetches while serving one request). The spawned task
/// shares the slot, so a [`set`] from either side is visible to both.
///
/// When called outside a scope this degrades to a plain `tokio::spawn`.
pub fn scoped_spawn<F>(future: F) -> JoinHandle<F::Output>
where
    F: Future + Send + 'static,
    F::Output: Send + 'static,
{
    match CURRENT_TENANT.try_with(Arc::clone) {
        Ok(slot) => tokio::spawn(CURRENT_TENANT.scope(slot, future)),
        Err(_) => tokio::spawn(future),
    }
}
