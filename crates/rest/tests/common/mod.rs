//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use akademi_core::audit::{AuditEntry, AuditSink, MemoryAuditSink};
use akademi_core::error::AuditError;
use akademi_core::permissions::{PermissionMatrix, RoleCapabilities};
use akademi_rest::{AppState, ServerConfig};
use async_trait::async_trait;
use axum_test::TestServer;

/// A matrix with one full-access role and one export-only role.
pub fn hq_matrix() -> PermissionMatrix {
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

/// Creates a test server over the given matrix, sink and configuration.
pub fn create_test_server_with(
    matrix: PermissionMatrix,
    sink: Arc<dyn AuditSink>,
    config: ServerConfig,
) -> TestServer {
    let state = AppState::new(matrix, sink, config.clone());
    let app = akademi_rest::routing::create_routes(state);
    TestServer::new(app).expect("Failed to create test server")
}

/// Creates a test server with the standard matrix and a memory audit sink.
pub fn create_test_server() -> (TestServer, Arc<MemoryAuditSink>) {
    let sink = Arc::new(MemoryAuditSink::new());
    let server = create_test_server_with(hq_matrix(), sink.clone(), ServerConfig::for_testing());
    (server, sink)
}

/// An audit sink whose writes always fail.
pub struct FailingSink;

#[async_trait]
impl AuditSink for FailingSink {
    async fn record(&self, _entry: AuditEntry) -> Result<(), AuditError> {
        Err(AuditError::WriteFailed {
            message: "audit store unreachable".to_string(),
        })
    }
}
