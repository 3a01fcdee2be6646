//! Integration tests for the tenant gate.
//!
//! Covers header extraction and normalization, the allowlist, claim
//! enforcement, the empty-claims policy and the response echo.

mod common;

use std::sync::Arc;

use akademi_core::audit::MemoryAuditSink;
use axum::http::{HeaderName, HeaderValue, Method, StatusCode};
use axum_test::TestServer;
use akademi_rest::ServerConfig;

use common::{create_test_server, create_test_server_with, hq_matrix};

const X_TENANT_ID: HeaderName = HeaderName::from_static("x-tenant-id");
const X_AUTH_SUBJECT: HeaderName = HeaderName::from_static("x-auth-subject");
const X_AUTH_ROLE: HeaderName = HeaderName::from_static("x-auth-role");
const X_AUTH_TENANT: HeaderName = HeaderName::from_static("x-auth-tenant");
const X_AUTH_TENANTS: HeaderName = HeaderName::from_static("x-auth-tenants");

// =============================================================================
// Allowlist
// =============================================================================

mod allowlist {
    use super::*;

    #[tokio::test]
    async fn test_health_needs_no_tenant() {
        let (server, _sink) = create_test_server();

        let response = server.get("/health").await;
        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn test_probes_need_no_tenant() {
        let (server, _sink) = create_test_server();

        server.get("/_liveness").await.assert_status_ok();
        server.get("/_readiness").await.assert_status_ok();
    }

    #[tokio::test]
    async fn test_allowlisted_response_carries_no_tenant_echo() {
        let (server, _sink) = create_test_server();

        let response = server.get("/health").await;
        response.assert_status_ok();
        assert!(response.maybe_header("x-tenant-id").is_none());
    }
}

// =============================================================================
// Tenant extraction
// =============================================================================

mod extraction {
    use super::*;

    #[tokio::test]
    async fn test_missing_tenant_rejected() {
        let (server, _sink) = create_test_server();

        let response = server.get("/api/tenant").await;
        response.assert_status_bad_request();

        let body: serde_json::Value = response.json();
        assert_eq!(body["title"], "Tenant missing");
        assert_eq!(body["status"], 400);
        assert!(response.maybe_header("x-tenant-id").is_none());
    }

    #[tokio::test]
    async fn test_blank_tenant_rejected() {
        let (server, _sink) = create_test_server();

        let response = server
            .get("/api/tenant")
            .add_header(X_TENANT_ID, HeaderValue::from_static("   "))
            .await;
        response.assert_status_bad_request();
    }

    #[tokio::test]
    async fn test_tenant_echoed_on_response() {
        let (server, _sink) = create_test_server();

        let response = server
            .get("/api/tenant")
            .add_header(X_TENANT_ID, HeaderValue::from_static("acme"))
            .await;
        response.assert_status_ok();

        let body: serde_json::Value = response.json();
        assert_eq!(body["tenant"], "acme");
        assert_eq!(response.header("x-tenant-id"), "acme");
    }

    #[tokio::test]
    async fn test_surrounding_whitespace_trimmed_spelling_kept() {
        let (server, _sink) = create_test_server();

        // Claim uses different casing; matching is case-insensitive, but the
        // request's own (trimmed) spelling is what flows through.
        let response = server
            .get("/api/tenant")
            .add_header(X_TENANT_ID, HeaderValue::from_static("Alpha-Branch "))
            .add_header(X_AUTH_SUBJECT, HeaderValue::from_static("user-1"))
            .add_header(X_AUTH_TENANT, HeaderValue::from_static("alpha-branch"))
            .await;
        response.assert_status_ok();

        let body: serde_json::Value = response.json();
        assert_eq!(body["tenant"], "Alpha-Branch");
        assert_eq!(response.header("x-tenant-id"), "Alpha-Branch");
    }
}

// =============================================================================
// Claim enforcement
// =============================================================================

mod claims {
    use super::*;

    #[tokio::test]
    async fn test_permitted_tenant_accepted() {
        let (server, _sink) = create_test_server();

        let response = server
            .get("/api/tenant")
            .add_header(X_TENANT_ID, HeaderValue::from_static("beta"))
            .add_header(X_AUTH_SUBJECT, HeaderValue::from_static("user-1"))
            .add_header(X_AUTH_TENANTS, HeaderValue::from_static("alpha,beta"))
            .await;
        response.assert_status_ok();
    }

    #[tokio::test]
    async fn test_unpermitted_tenant_rejected() {
        let (server, _sink) = create_test_server();

        let response = server
            .get("/api/tenant")
            .add_header(X_TENANT_ID, HeaderValue::from_static("beta"))
            .add_header(X_AUTH_SUBJECT, HeaderValue::from_static("user-1"))
            .add_header(X_AUTH_TENANTS, HeaderValue::from_static("alpha,gamma"))
            .await;
        response.assert_status_forbidden();

        let body: serde_json::Value = response.json();
        assert_eq!(body["title"], "Tenant access denied");
        assert_eq!(body["status"], 403);
    }

    #[tokio::test]
    async fn test_denied_request_reaches_no_handler() {
        let (server, sink) = create_test_server();

        // A create-capable role still cannot act on a tenant outside its
        // claim set; the gate rejects before the handler runs, so nothing
        // is created and nothing is audited.
        let response = server
            .post("/hq/licenses")
            .add_header(X_TENANT_ID, HeaderValue::from_static("beta"))
            .add_header(X_AUTH_SUBJECT, HeaderValue::from_static("hq-user"))
            .add_header(X_AUTH_ROLE, HeaderValue::from_static("HqAdmin"))
            .add_header(X_AUTH_TENANT, HeaderValue::from_static("alpha"))
            .json(&serde_json::json!({ "tenant_id": "beta", "plan": "standard" }))
            .await;
        response.assert_status_forbidden();
        assert!(sink.is_empty());
    }

    #[tokio::test]
    async fn test_empty_claim_set_is_unrestricted_by_default() {
        let (server, _sink) = create_test_server();

        let response = server
            .get("/api/tenant")
            .add_header(X_TENANT_ID, HeaderValue::from_static("any-branch"))
            .add_header(X_AUTH_SUBJECT, HeaderValue::from_static("svc-1"))
            .await;
        response.assert_status_ok();
    }

    #[tokio::test]
    async fn test_empty_claim_set_denied_under_strict_policy() {
        let sink = Arc::new(MemoryAuditSink::new());
        let config = ServerConfig {
            deny_empty_claims: true,
            ..ServerConfig::for_testing()
        };
        let server = create_test_server_with(hq_matrix(), sink, config);

        let response = server
            .get("/api/tenant")
            .add_header(X_TENANT_ID, HeaderValue::from_static("alpha"))
            .add_header(X_AUTH_SUBJECT, HeaderValue::from_static("svc-1"))
            .await;
        response.assert_status_forbidden();
    }

    #[tokio::test]
    async fn test_anonymous_request_with_tenant_accepted() {
        let (server, _sink) = create_test_server();

        // No identity headers at all: the gate has no claims to enforce.
        let response = server
            .get("/api/tenant")
            .add_header(X_TENANT_ID, HeaderValue::from_static("alpha"))
            .await;
        response.assert_status_ok();
    }
}

// =============================================================================
// Preflight and concurrency
// =============================================================================

mod passthrough {
    use super::*;

    #[tokio::test]
    async fn test_cors_preflight_needs_no_tenant() {
        let sink = Arc::new(MemoryAuditSink::new());
        let config = ServerConfig {
            enable_cors: true,
            ..ServerConfig::for_testing()
        };
        let app = akademi_rest::create_app(hq_matrix(), sink, config);
        let server = TestServer::new(app).expect("Failed to create test server");

        let response = server
            .method(Method::OPTIONS, "/api/tenant")
            .add_header(
                HeaderName::from_static("origin"),
                HeaderValue::from_static("https://app.example.com"),
            )
            .add_header(
                HeaderName::from_static("access-control-request-method"),
                HeaderValue::from_static("GET"),
            )
            .await;

        assert_ne!(response.status_code(), StatusCode::BAD_REQUEST);
        assert_ne!(response.status_code(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_concurrent_requests_keep_their_own_tenant() {
        let (server, _sink) = create_test_server();

        let alpha = server
            .get("/api/tenant")
            .add_header(X_TENANT_ID, HeaderValue::from_static("alpha"));
        let beta = server
            .get("/api/tenant")
            .add_header(X_TENANT_ID, HeaderValue::from_static("beta"));

        let (alpha, beta) = tokio::join!(alpha, beta);

        alpha.assert_status_ok();
        beta.assert_status_ok();
        let alpha_body: serde_json::Value = alpha.json();
        let beta_body: serde_json::Value = beta.json();
        assert_eq!(alpha_body["tenant"], "alpha");
        assert_eq!(beta_body["tenant"], "beta");
    }
}
