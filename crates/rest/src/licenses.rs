//! In-memory license registry for headquarters operations.
//!
//! Licenses are the entity the headquarters capability checks protect. The
//! registry here is process-local; a durable store can replace it behind the
//! same surface without touching the handlers.

use akademi_core::tenant::TenantId;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// A franchise license issued by headquarters to one tenant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct License {
    /// Unique license id.
    pub id: Uuid,
    /// Tenant the license is issued to.
    pub tenant_id: TenantId,
    /// Commercial plan name, e.g. `"standard"` or `"campus"`.
    pub plan: String,
    /// When the license was issued.
    pub issued_at: DateTime<Utc>,
}

impl License {
    /// Issues a new license for `tenant_id` on `plan`.
    pub fn issue(tenant_id: TenantId, plan: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            tenant_id,
            plan: plan.into(),
            issued_at: Utc::now(),
        }
    }
}

/// Shared, thread-safe license registry.
#[derive(Debug, Clone, Default)]
pub struct LicenseRegistry {
    licenses: Arc<RwLock<Vec<License>>>,
}

impl LicenseRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one license.
    pub fn add(&self, license: License) {
        self.licenses.write().push(license);
    }

    /// Adds a batch of licenses, returning how many were added.
    pub fn add_all(&self, licenses: Vec<License>) -> usize {
        let count = licenses.len();
        self.licenses.write().extend(licenses);
        count
    }

    /// Returns a snapshot of every license across all tenants.
    pub fn all(&self) -> Vec<License> {
        self.licenses.read().clone()
    }

    /// Returns the number of registered licenses.
    pub fn len(&self) -> usize {
        self.licenses.read().len()
    }

    /// Returns `true` when the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.licenses.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_and_add() {
        let registry = LicenseRegistry::new();
        assert!(registry.is_empty());

        registry.add(License::issue(TenantId::new("alpha"), "standard"));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.all()[0].plan, "standard");
    }

    #[test]
    fn test_add_all_counts() {
        let registry = LicenseRegistry::new();
        let batch = vec![
            License::issue(TenantId::new("alpha"), "standard"),
            License::issue(TenantId::new("beta"), "campus"),
        ];
        assert_eq!(registry.add_all(batch), 2);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_registry_is_shared_across_clones() {
        let registry = LicenseRegistry::new();
        let clone = registry.clone();
        clone.add(License::issue(TenantId::new("alpha"), "standard"));
        assert_eq!(registry.len(), 1);
    }
}
