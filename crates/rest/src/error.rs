//! Error types for the Akademi REST API.
//!
//! This module defines all error types used throughout the REST API layer,
//! with automatic conversion to RFC 9457 problem-details responses.
//!
//! # Error Mapping
//!
//! Core errors from the tenant layer are automatically mapped to
//! appropriate HTTP status codes:
//!
//! | Core Error | HTTP Status | Title |
//! |-----------|-------------|-------|
//! | TenantError::Missing | 400 | Tenant missing |
//! | TenantError::AccessDenied | 403 | Tenant access denied |

use akademi_core::error::TenantError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;

/// The primary error type for REST API operations.
///
/// This enum provides semantic error types that map cleanly to HTTP status
/// codes and problem-details payloads.
#[derive(Debug)]
pub enum RestError {
    /// The request carried no usable tenant identifier (HTTP 400).
    MissingTenant,

    /// The caller's claims do not permit the requested tenant (HTTP 403).
    TenantAccessDenied {
        /// Subject of the denied caller.
        subject: String,
        /// The tenant the caller requested.
        tenant_id: String,
    },

    /// No authenticated caller identity on a route that requires one (HTTP 401).
    Unauthenticated,

    /// Caller's role lacks a required capability (HTTP 403).
    Forbidden {
        /// Error message.
        message: String,
    },

    /// Bad request - validation error (HTTP 400).
    BadRequest {
        /// Error message.
        message: String,
    },

    /// Internal server error (HTTP 500).
    InternalError {
        /// Error message.
        message: String,
    },
}

impl fmt::Display for RestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RestError::MissingTenant => {
                write!(f, "Tenant identifier missing from request")
            }
            RestError::TenantAccessDenied { subject, tenant_id } => {
                write!(f, "Caller '{}' denied access to tenant '{}'", subject, tenant_id)
            }
            RestError::Unauthenticated => {
                write!(f, "No authenticated caller identity")
            }
            RestError::Forbidden { message } => {
                write!(f, "Forbidden: {}", message)
            }
            RestError::BadRequest { message } => {
                write!(f, "Bad request: {}", message)
            }
            RestError::InternalError { message } => {
                write!(f, "Internal error: {}", message)
            }
        }
    }
}

impl std::error::Error for RestError {}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        let (status, title, detail) = match &self {
            RestError::MissingTenant => (
                StatusCode::BAD_REQUEST,
                "Tenant missing",
                "Request carried no usable tenant identifier".to_string(),
            ),
            RestError::TenantAccessDenied { subject, tenant_id } => (
                StatusCode::FORBIDDEN,
                "Tenant access denied",
                format!(
                    "Caller '{}' is not permitted to act on tenant '{}'",
                    subject, tenant_id
                ),
            ),
            RestError::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                "Authentication required",
                "This operation requires an authenticated caller".to_string(),
            ),
            RestError::Forbidden { message } => {
                (StatusCode::FORBIDDEN, "Forbidden", message.clone())
            }
            RestError::BadRequest { message } => {
                (StatusCode::BAD_REQUEST, "Bad request", message.clone())
            }
            RestError::InternalError { message } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal error",
                message.clone(),
            ),
        };

        let problem = create_problem(status, title, &detail);
        (status, Json(problem)).into_response()
    }
}

/// Creates an RFC 9457 problem-details payload.
///
/// # Arguments
///
/// * `status` - The HTTP status the response will carry
/// * `title` - Short, human-readable summary of the problem type
/// * `detail` - Human-readable explanation of this occurrence
fn create_problem(status: StatusCode, title: &str, detail: &str) -> serde_json::Value {
    serde_json::json!({
        "title": title,
        "detail": detail,
        "status": status.as_u16(),
    })
}

impl From<TenantError> for RestError {
    fn from(err: TenantError) -> Self {
        match err {
            TenantError::Missing => RestError::MissingTenant,
            TenantError::AccessDenied { subject, tenant_id } => RestError::TenantAccessDenied {
                subject,
                tenant_id: tenant_id.to_string(),
            },
        }
    }
}

impl From<serde_json::Error> for RestError {
    fn from(err: serde_json::Error) -> Self {
        RestError::BadRequest {
            message: format!("Invalid JSON: {}", err),
        }
    }
}

/// Result type alias for REST operations.
pub type RestResult<T> = Result<T, RestError>;
