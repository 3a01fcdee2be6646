//! Caller identity extractor.
//!
//! Extracts the [`CallerIdentity`] attached by the claims middleware for use
//! in handlers that require an authenticated caller.

use akademi_core::tenant::CallerIdentity;
use axum::{extract::FromRequestParts, http::request::Parts};

use crate::error::RestError;

/// Axum extractor for the authenticated caller.
///
/// Rejects with 401 when the claims middleware attached no identity, so
/// handlers using this extractor never run for anonymous requests.
///
/// # Example
///
/// ```rust,ignore
/// use akademi_rest::extractors::IdentityExtractor;
///
/// async fn handler(IdentityExtractor(identity): IdentityExtractor) {
///     println!("Caller: {}", identity.subject());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct IdentityExtractor(pub CallerIdentity);

impl IdentityExtractor {
    /// Returns the caller's subject.
    pub fn subject(&self) -> &str {
        self.0.subject()
    }

    /// Returns the caller's role, if one was claimed.
    pub fn role(&self) -> Option<&str> {
        self.0.role()
    }
}

impl<S> FromRequestParts<S> for IdentityExtractor
where
    S: Send + Sync,
{
    type Rejection = RestError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CallerIdentity>()
            .cloned()
            .map(IdentityExtractor)
            .ok_or(RestError::Unauthenticated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;

    #[tokio::test]
    async fn test_extracts_identity_extension() {
        let identity = CallerIdentity::from_claims("user-1", Some("HqAdmin".to_string()), None, None);
        let request = Request::builder()
            .uri("/hq/licenses")
            .extension(identity)
            .body(Body::empty())
            .unwrap();
        let (mut parts, _) = request.into_parts();

        let extracted = IdentityExtractor::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert_eq!(extracted.subject(), "user-1");
        assert_eq!(extracted.role(), Some("HqAdmin"));
    }

    #[tokio::test]
    async fn test_missing_identity_rejects() {
        let request = Request::builder()
            .uri("/hq/licenses")
            .body(Body::empty())
            .unwrap();
        let (mut parts, _) = request.into_parts();

        let result = IdentityExtractor::from_request_parts(&mut parts, &()).await;
        assert!(matches!(result, Err(RestError::Unauthenticated)));
    }
}
