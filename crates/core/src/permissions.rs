//! Headquarters permission matrix.
//!
//! Maps a role name to the set of capabilities it holds for
//! headquarters-level license operations. The matrix is a pure, in-memory
//! lookup: no I/O, no mutation, no suspension. Configuration loading (where
//! the role map comes from) is the server binary's concern.
//!
//! Role lookup is case-sensitive by design: roles are a closed, internally
//! defined enumeration, not user input. Tenant-identifier matching, by
//! contrast, is case-insensitive (see [`crate::tenant::TenantId`]).

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A headquarters capability gated by the matrix.
///
/// Capabilities are independent; holding one never implies another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Capability {
    /// Create new licenses.
    Create,
    /// Export license data.
    ExportData,
    /// Import license data.
    ImportData,
    /// Impersonate a tenant-level actor.
    Impersonate,
    /// Manage license lifecycle (suspend, revoke, reassign).
    Manage,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capability::Create => write!(f, "create"),
            Capability::ExportData => write!(f, "exportData"),
            Capability::ImportData => write!(f, "importData"),
            Capability::Impersonate => write!(f, "impersonate"),
            Capability::Manage => write!(f, "manage"),
        }
    }
}

/// The capability record for one role: five independent booleans.
///
/// The default is deny-all, which doubles as the record for unknown roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RoleCapabilities {
    /// May create licenses.
    pub create: bool,
    /// May export license data.
    pub export_data: bool,
    /// May import license data.
    pub import_data: bool,
    /// May impersonate a tenant-level actor.
    pub impersonate: bool,
    /// May manage license lifecycle.
    pub manage: bool,
}

impl RoleCapabilities {
    /// Returns the deny-all record.
    pub fn deny_all() -> Self {
        Self::default()
    }

    /// Returns a record with every capability granted.
    pub fn full() -> Self {
        Self {
            create: true,
            export_data: true,
            import_data: true,
            impersonate: true,
            manage: true,
        }
    }

    /// Returns `true` if this record grants the given capability.
    pub fn allows(&self, capability: Capability) -> bool {
        match capability {
            Capability::Create => self.create,
            Capability::ExportData => self.export_data,
            Capability::ImportData => self.import_data,
            Capability::Impersonate => self.impersonate,
            Capability::Manage => self.manage,
        }
    }
}

/// Pure lookup from role name to [`RoleCapabilities`].
///
/// Built from an externally supplied map; roles absent from the map resolve
/// to the deny-all default — never an error, never an accidental allow.
///
/// # Examples
///
/// ```
/// use akademi_core::permissions::{Capability, PermissionMatrix, RoleCapabilities};
///
/// let matrix = PermissionMatrix::new(
///     [(
///         "HqAdmin".to_string(),
///         RoleCapabilities {
///             create: true,
///             export_data: true,
///             ..Default::default()
///         },
///     )]
///     .into(),
/// );
///
/// assert!(matrix.capabilities("HqAdmin").create);
/// assert!(!matrix.capabilities("HqAdmin").impersonate);
/// // Unknown roles deny everything.
/// assert_eq!(
///     matrix.capabilities("EgitimYoneticisi"),
///     RoleCapabilities::deny_all()
/// );
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionMatrix {
    roles: HashMap<String, RoleCapabilities>,
}

impl PermissionMatrix {
    /// Creates a matrix from a role-to-capabilities map.
    pub fn new(roles: HashMap<String, RoleCapabilities>) -> Self {
        Self { roles }
    }

    /// Creates a matrix that denies everything for every role.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns the capability record for `role`.
    ///
    /// Unknown or empty roles resolve to the deny-all default. Lookup is
    /// case-sensitive.
    pub fn capabilities(&self, role: &str) -> RoleCapabilities {
        self.roles.get(role).copied().unwrap_or_default()
    }

    /// Returns `true` if `role` (when present) grants `capability`.
    ///
    /// A `None` role denies everything.
    pub fn allows(&self, role: Option<&str>, capability: Capability) -> bool {
        role.map(|r| self.capabilities(r).allows(capability))
            .unwrap_or(false)
    }

    /// Returns the number of configured roles.
    pub fn len(&self) -> usize {
        self.roles.len()
    }

    /// Returns `true` if no roles are configured.
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_matrix() -> PermissionMatrix {
        PermissionMatrix::new(
            [
                ("HqAdmin".to_string(), RoleCapabilities::full()),
                (
                    "HqSupport".to_string(),
                    RoleCapabilities {
                        export_data: true,
                        ..Default::default()
                    },
                ),
            ]
            .into(),
        )
    }

    #[test]
    fn test_configured_role() {
        let matrix = sample_matrix();
        let caps = matrix.capabilities("HqAdmin");
        assert!(caps.create);
        assert!(caps.export_data);
        assert!(caps.import_data);
        assert!(caps.impersonate);
        assert!(caps.manage);
    }

    #[test]
    fn test_capabilities_are_independent() {
        let matrix = sample_matrix();
        let caps = matrix.capabilities("HqSupport");
        assert!(caps.export_data);
        // export does not imply import
        assert!(!caps.import_data);
        assert!(!caps.create);
        assert!(!caps.impersonate);
        assert!(!caps.manage);
    }

    #[test]
    fn test_unknown_role_denies_all() {
        let matrix = sample_matrix();
        assert_eq!(
            matrix.capabilities("EgitimYoneticisi"),
            RoleCapabilities::deny_all()
        );
        assert_eq!(matrix.capabilities(""), RoleCapabilities::deny_all());
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let matrix = sample_matrix();
        assert!(matrix.capabilities("HqAdmin").create);
        assert!(!matrix.capabilities("hqadmin").create);
    }

    #[test]
    fn test_allows_with_missing_role() {
        let matrix = sample_matrix();
        assert!(!matrix.allows(None, Capability::Create));
        assert!(matrix.allows(Some("HqAdmin"), Capability::Create));
        assert!(!matrix.allows(Some("HqSupport"), Capability::Create));
    }

    #[test]
    fn test_deserialize_from_config() {
        let json = r#"{
            "HqAdmin": { "create": true, "exportData": true, "importData": true, "impersonate": true, "manage": true },
            "HqViewer": { "exportData": true }
        }"#;
        let matrix: PermissionMatrix = serde_json::from_str(json).unwrap();
        assert!(matrix.capabilities("HqAdmin").impersonate);
        assert!(matrix.capabilities("HqViewer").export_data);
        // Unlisted fields default to false.
        assert!(!matrix.capabilities("HqViewer").create);
        // Unlisted roles default to deny-all.
        assert!(!matrix.capabilities("Registrar").export_data);
    }
}
