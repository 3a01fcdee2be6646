//! Tenant identifier type.
//!
//! This module defines the [`TenantId`] type, an opaque, case-normalized
//! identifier for a tenant (a franchise/branch).

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TenantError;

/// The default tenant sentinel, reported when no tenant has been installed
/// for the current unit of work.
pub const DEFAULT_TENANT: &str = "default";

/// An opaque tenant identifier.
///
/// The identifier is trimmed on construction and compared
/// case-insensitively; the original (trimmed) spelling is preserved for
/// display and for echoing back to callers.
///
/// # Examples
///
/// ```
/// use akademi_core::tenant::TenantId;
///
/// let a = TenantId::new("Alpha-Branch");
/// let b = TenantId::new("alpha-branch");
/// assert_eq!(a, b);
/// assert_eq!(a.as_str(), "Alpha-Branch");
/// ```
#[derive(Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TenantId(String);

impl TenantId {
    /// Creates a tenant ID from trusted input, trimming surrounding
    /// whitespace.
    ///
    /// For untrusted request input prefer [`TenantId::parse`], which rejects
    /// blank values.
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(id.as_ref().trim().to_string())
    }

    /// Parses a tenant ID from raw request input.
    ///
    /// Trims surrounding whitespace and rejects values that are empty after
    /// trimming.
    ///
    /// # Examples
    ///
    /// ```
    /// use akademi_core::tenant::TenantId;
    ///
    /// let tenant = TenantId::parse("Alpha-Branch ").unwrap();
    /// assert_eq!(tenant.as_str(), "Alpha-Branch");
    /// assert!(TenantId::parse("   ").is_err());
    /// ```
    pub fn parse(raw: &str) -> Result<Self, TenantError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TenantError::Missing);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the default tenant sentinel.
    pub fn default_tenant() -> Self {
        Self(DEFAULT_TENANT.to_string())
    }

    /// Returns the tenant ID as a string slice, in its original spelling.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if this is the default sentinel.
    pub fn is_default(&self) -> bool {
        self.0.eq_ignore_ascii_case(DEFAULT_TENANT)
    }
}

impl PartialEq for TenantId {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_lowercase() == other.0.to_lowercase()
    }
}

impl Eq for TenantId {}

impl Hash for TenantId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_lowercase().hash(state);
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TenantId({})", self.0)
    }
}

impl FromStr for TenantId {
    type Err = TenantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TenantId::parse(s)
    }
}

impl From<&str> for TenantId {
    fn from(s: &str) -> Self {
        TenantId::new(s)
    }
}

impl From<String> for TenantId {
    fn from(s: String) -> Self {
        TenantId::new(s)
    }
}

impl AsRef<str> for TenantId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_new_trims() {
        let tenant = TenantId::new("  acme  ");
        assert_eq!(tenant.as_str(), "acme");
    }

    #[test]
    fn test_parse_trims_and_keeps_spelling() {
        let tenant = TenantId::parse("Alpha-Branch ").unwrap();
        assert_eq!(tenant.as_str(), "Alpha-Branch");
    }

    #[test]
    fn test_parse_rejects_blank() {
        assert_eq!(TenantId::parse(""), Err(TenantError::Missing));
        assert_eq!(TenantId::parse("   "), Err(TenantError::Missing));
        assert_eq!(TenantId::parse("\t\n"), Err(TenantError::Missing));
    }

    #[test]
    fn test_case_insensitive_equality() {
        assert_eq!(TenantId::new("Alpha-Branch"), TenantId::new("alpha-branch"));
        assert_eq!(TenantId::new("ACME"), TenantId::new("acme"));
        assert_ne!(TenantId::new("acme"), TenantId::new("globex"));
    }

    #[test]
    fn test_case_insensitive_hash() {
        let mut set = HashSet::new();
        set.insert(TenantId::new("Alpha-Branch"));
        assert!(set.contains(&TenantId::new("alpha-branch")));
        assert!(!set.contains(&TenantId::new("beta-branch")));
    }

    #[test]
    fn test_default_tenant() {
        let tenant = TenantId::default_tenant();
        assert!(tenant.is_default());
        assert_eq!(tenant.as_str(), DEFAULT_TENANT);
    }

    #[test]
    fn test_serde_roundtrip() {
        let tenant = TenantId::new("acme");
        let json = serde_json::to_string(&tenant).unwrap();
        assert_eq!(json, "\"acme\"");

        let parsed: TenantId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, tenant);
    }

    #[test]
    fn test_from_string() {
        let tenant: TenantId = "my-tenant".into();
        assert_eq!(tenant.as_str(), "my-tenant");

        let tenant2: TenantId = String::from("my-tenant").into();
        assert_eq!(tenant2.as_str(), "my-tenant");
    }
}
