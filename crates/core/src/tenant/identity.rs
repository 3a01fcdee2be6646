//! Caller identity and permitted-tenant claims.
//!
//! The authentication layer (external to this crate) produces a
//! [`CallerIdentity`] from the principal's validated claims. The tenant gate
//! only reads it: it never issues or verifies tokens.

use serde::{Deserialize, Serialize};

use crate::error::TenantError;

use super::id::TenantId;

/// How an empty permitted-tenant set is interpreted.
///
/// The observed platform behavior treats an empty set as "no restriction",
/// intended for trusted system/service principals whose tenant restriction
/// is deferred to downstream authorization. The stricter reading (empty set
/// denies everything) is equally defensible for user principals, so the
/// choice is configuration, not a hardcoded default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyClaimsPolicy {
    /// An empty set places no restriction on the caller (default).
    #[default]
    Unrestricted,
    /// An empty set denies access to every tenant.
    Deny,
}

/// The authenticated principal's claim set, as read by the tenant gate.
///
/// Produced by the authentication layer before the gate runs; the gate only
/// consults the permitted-tenant set. Tenant membership is matched
/// case-insensitively (the set holds [`TenantId`] values).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerIdentity {
    subject: String,
    role: Option<String>,
    permitted_tenants: Vec<TenantId>,
}

impl CallerIdentity {
    /// Creates an identity with an explicit permitted-tenant set.
    pub fn new(
        subject: impl Into<String>,
        role: Option<String>,
        permitted_tenants: Vec<TenantId>,
    ) -> Self {
        Self {
            subject: subject.into(),
            role,
            permitted_tenants,
        }
    }

    /// Builds an identity from the two optional tenant claims.
    ///
    /// If the comma-separated multi-tenant claim is present it takes
    /// precedence and is split and trimmed into the set; otherwise the
    /// single-tenant claim (if present) forms a one-element set; otherwise
    /// the set is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use akademi_core::tenant::CallerIdentity;
    ///
    /// let identity = CallerIdentity::from_claims(
    ///     "user-1",
    ///     Some("HqAdmin".to_string()),
    ///     Some("ignored"),
    ///     Some("alpha, beta ,gamma"),
    /// );
    /// assert_eq!(identity.permitted_tenants().len(), 3);
    /// ```
    pub fn from_claims(
        subject: impl Into<String>,
        role: Option<String>,
        tenant_claim: Option<&str>,
        tenants_claim: Option<&str>,
    ) -> Self {
        let permitted_tenants = match tenants_claim {
            Some(list) => list
                .split(',')
                .filter_map(|part| TenantId::parse(part).ok())
                .collect(),
            None => tenant_claim
                .and_then(|t| TenantId::parse(t).ok())
                .into_iter()
                .collect(),
        };

        Self {
            subject: subject.into(),
            role,
            permitted_tenants,
        }
    }

    /// Returns the caller's subject.
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Returns the caller's role, if one was claimed.
    pub fn role(&self) -> Option<&str> {
        self.role.as_deref()
    }

    /// Returns the permitted-tenant set (possibly empty).
    pub fn permitted_tenants(&self) -> &[TenantId] {
        &self.permitted_tenants
    }

    /// Returns `true` when the permitted-tenant set is empty.
    pub fn is_unrestricted(&self) -> bool {
        self.permitted_tenants.is_empty()
    }

    /// Returns `true` if this caller may act on `tenant` under `policy`.
    pub fn permits(&self, tenant: &TenantId, policy: EmptyClaimsPolicy) -> bool {
        if self.permitted_tenants.is_empty() {
            return matches!(policy, EmptyClaimsPolicy::Unrestricted);
        }
        self.permitted_tenants.contains(tenant)
    }

    /// Checks that this caller may act on `tenant`, failing closed.
    ///
    /// Returns [`TenantError::AccessDenied`] carrying the caller subject and
    /// the requested tenant so denials can be logged for security review.
    pub fn authorize_tenant(
        &self,
        tenant: &TenantId,
        policy: EmptyClaimsPolicy,
    ) -> Result<(), TenantError> {
        if self.permits(tenant, policy) {
            Ok(())
        } else {
            Err(TenantError::AccessDenied {
                subject: self.subject.clone(),
                tenant_id: tenant.clone(),
            })
        }
    }
}
