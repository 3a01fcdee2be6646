//! Application state for the Akademi REST API.
//!
//! This module defines the shared application state that is available to all
//! request handlers. It includes the permission matrix, the audit sink, the
//! license registry, and the server configuration.

use std::sync::Arc;

use akademi_core::audit::AuditSink;
use akademi_core::permissions::PermissionMatrix;

use crate::config::ServerConfig;
use crate::licenses::LicenseRegistry;

/// Shared application state for the REST API.
///
/// This struct holds all the shared state that handlers need access to,
/// including the headquarters permission matrix and the audit sink.
///
/// # Example
///
/// ```rust
/// use akademi_core::audit::MemoryAuditSink;
/// use akademi_core::permissions::PermissionMatrix;
/// use akademi_rest::{AppState, ServerConfig};
/// use std::sync::Arc;
///
/// let state = AppState::new(
///     PermissionMatrix::empty(),
///     Arc::new(MemoryAuditSink::new()),
///     ServerConfig::default(),
/// );
/// ```
pub struct AppState {
    /// Headquarters role-capability matrix.
    matrix: Arc<PermissionMatrix>,

    /// Destination for audit entries from privileged operations.
    audit: Arc<dyn AuditSink>,

    /// In-memory license registry.
    licenses: LicenseRegistry,

    /// Server configuration.
    config: Arc<ServerConfig>,
}

// Manually implement Clone since the sink is a trait object behind an Arc
impl Clone for AppState {
    fn clone(&self) -> Self {
        Self {
            matrix: Arc::clone(&self.matrix),
            audit: Arc::clone(&self.audit),
            licenses: self.licenses.clone(),
            config: Arc::clone(&self.config),
        }
    }
}

impl AppState {
    /// Creates a new AppState with the given matrix, audit sink and
    /// configuration.
    pub fn new(matrix: PermissionMatrix, audit: Arc<dyn AuditSink>, config: ServerConfig) -> Self {
        Self {
            matrix: Arc::new(matrix),
            audit,
            licenses: LicenseRegistry::new(),
            config: Arc::new(config),
        }
    }

    /// Returns the headquarters permission matrix.
    pub fn matrix(&self) -> &PermissionMatrix {
        &self.matrix
    }

    /// Returns the audit sink.
    pub fn audit(&self) -> &dyn AuditSink {
        self.audit.as_ref()
    }

    /// Returns the license registry.
    pub fn licenses(&self) -> &LicenseRegistry {
        &self.licenses
    }

    /// Returns a reference to the server configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}
