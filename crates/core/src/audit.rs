//! Audit trail contract for privileged operations.
//!
//! Privileged operations (impersonation, tenant-crossing license actions)
//! record a tamper-evident [`AuditEntry`] through an [`AuditSink`]. The
//! caller awaits submission before declaring the privileged action complete;
//! the sink's own persistence may be asynchronous internally.
//!
//! Audit failure is a secondary, warning-level condition: it never masks the
//! primary action's outcome and never crashes the caller. Use
//! [`record_or_warn`] from handlers.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;
use uuid::Uuid;

use crate::error::AuditError;
use crate::tenant::{self, TenantId};

/// One immutable record of a privileged action.
///
/// Created exactly once per action; never mutated or deleted by this core
/// (retention is the audit store's concern).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// Generated entry id, usable as a log correlation id.
    pub id: Uuid,
    /// Action name, e.g. `"hq.impersonate"`.
    pub action: String,
    /// Subject of the actor who performed the action.
    pub actor: String,
    /// Role of the actor, if known.
    pub actor_role: Option<String>,
    /// Tenant the action applied to; `None` for cross-tenant actions.
    pub tenant_id: Option<TenantId>,
    /// Type of the entity the action touched, e.g. `"License"`.
    pub entity_type: String,
    /// Id of the entity, when one exists.
    pub entity_id: Option<String>,
    /// Free-form metadata, serialized into the store as-is.
    pub metadata: Option<Value>,
    /// When the entry was created.
    pub recorded_at: DateTime<Utc>,
}

impl AuditEntry {
    /// Creates an entry for `action` on `entity_type` by `actor`.
    ///
    /// The tenant defaults to the ambient tenant of the current unit of
    /// work, when one is active; override with [`AuditEntry::with_tenant`]
    /// or clear with [`AuditEntry::cross_tenant`].
    pub fn new(
        action: impl Into<String>,
        actor: impl Into<String>,
        entity_type: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            action: action.into(),
            actor: actor.into(),
            actor_role: None,
            tenant_id: tenant::try_current(),
            entity_type: entity_type.into(),
            entity_id: None,
            metadata: None,
            recorded_at: Utc::now(),
        }
    }

    /// Sets the actor's role.
    pub fn with_actor_role(mut self, role: impl Into<String>) -> Self {
        self.actor_role = Some(role.into());
        self
    }

    /// Overrides the tenant the entry is attributed to.
    pub fn with_tenant(mut self, tenant_id: TenantId) -> Self {
        self.tenant_id = Some(tenant_id);
        self
    }

    /// Marks the entry as a cross-tenant action (no tenant attribution).
    pub fn cross_tenant(mut self) -> Self {
        self.tenant_id = None;
        self
    }

    /// Sets the entity id.
    pub fn with_entity_id(mut self, entity_id: impl Into<String>) -> Self {
        self.entity_id = Some(entity_id.into());
        self
    }

    /// Attaches free-form metadata.
    pub fn with_metadata(mut self, metadata: Value) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

/// Destination for audit entries.
///
/// `record` is awaited by the caller relative to the privileged action it
/// documents; implementations may persist asynchronously behind that call.
#[async_trait]
pub trait AuditSink: Send + Sync {
    /// Submits one entry for durable recording.
    async fn record(&self, entry: AuditEntry) -> Result<(), AuditError>;
}

/// Records `entry`, downgrading sink failure to a warning.
///
/// Returns `true` when the entry was accepted. On failure a WARN is logged
/// carrying the entry id as the correlation id, so operators can detect
/// audit-trail gaps; no error propagates to the caller and the enclosing
/// action's outcome is unaffected.
pub async fn record_or_warn(sink: &dyn AuditSink, entry: AuditEntry) -> bool {
    let entry_id = entry.id;
    let action = entry.action.clone();
    match sink.record(entry).await {
        Ok(()) => true,
        Err(err) => {
            warn!(
                audit_entry_id = %entry_id,
                action = %action,
                error = %err,
                "audit write failed; trail has a gap"
            );
            false
        }
    }
}

/// In-process audit sink, for development and tests.
#[derive(Debug, Default)]
pub struct MemoryAuditSink {
    entries: Mutex<Vec<AuditEntry>>,
}

impl MemoryAuditSink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of all recorded entries.
    pub fn entries(&self) -> Vec<AuditEntry> {
        self.entries.lock().clone()
    }

    /// Returns the number of recorded entries.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Returns `true` when nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

#[async_trait]
impl AuditSink for MemoryAuditSink {
    async fn record(&self, entry: AuditEntry) -> Result<(), AuditError> {
        self.entries.lock().push(entry);
        Ok(())
    }
}
