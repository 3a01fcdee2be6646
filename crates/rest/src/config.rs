//! Server configuration for the Akademi REST API.
//!
//! This module provides configuration types for the REST server, supporting
//! both programmatic configuration and environment variable overrides.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `AKADEMI_SERVER_PORT` | 8080 | Server port |
//! | `AKADEMI_SERVER_HOST` | 127.0.0.1 | Host to bind |
//! | `AKADEMI_LOG_LEVEL` | info | Log level |
//! | `AKADEMI_REQUEST_TIMEOUT` | 30 | Request timeout (seconds) |
//! | `AKADEMI_ENABLE_CORS` | true | Enable CORS |
//! | `AKADEMI_CORS_ORIGINS` | * | Allowed origins |
//! | `AKADEMI_CORS_METHODS` | GET,POST,PUT,PATCH,DELETE,OPTIONS | Allowed methods |
//! | `AKADEMI_CORS_HEADERS` | Content-Type,... | Allowed headers |
//! | `AKADEMI_TENANT_ALLOWLIST` | /swagger,... | Paths exempt from the tenant gate |
//! | `AKADEMI_DENY_EMPTY_CLAIMS` | false | Treat an empty permitted-tenant set as deny-all |
//! | `AKADEMI_PERMISSION_MATRIX` | (none) | Path to the role-capability matrix (JSON) |
//!
//! # Example
//!
//! ```rust
//! use akademi_rest::ServerConfig;
//!
//! // Create from environment
//! let config = ServerConfig::from_env();
//!
//! // Or create programmatically
//! let config = ServerConfig {
//!     port: 3000,
//!     host: "0.0.0.0".to_string(),
//!     enable_cors: true,
//!     ..Default::default()
//! };
//! ```

use akademi_core::tenant::EmptyClaimsPolicy;
use clap::Parser;

const DEFAULT_ALLOWLIST: &str = "/swagger,/hangfire,/health,/_liveness,/_readiness,/api/auth/login,/api/auth/refresh";

/// Server configuration for the Akademi REST API.
///
/// This struct can be constructed from environment variables using [`ServerConfig::from_env`],
/// from command line arguments using [`ServerConfig::parse`], or programmatically.
#[derive(Debug, Clone, Parser)]
#[command(name = "akademi-server")]
#[command(about = "Akademi multi-tenant platform server")]
pub struct ServerConfig {
    /// Port to listen on.
    #[arg(short, long, env = "AKADEMI_SERVER_PORT", default_value = "8080")]
    pub port: u16,

    /// Host address to bind to.
    #[arg(long, env = "AKADEMI_SERVER_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, env = "AKADEMI_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Request timeout in seconds.
    #[arg(long, env = "AKADEMI_REQUEST_TIMEOUT", default_value = "30")]
    pub request_timeout: u64,

    /// Enable CORS.
    #[arg(long, env = "AKADEMI_ENABLE_CORS", default_value = "true")]
    pub enable_cors: bool,

    /// Allowed CORS origins (comma-separated, or * for all).
    #[arg(long, env = "AKADEMI_CORS_ORIGINS", default_value = "*")]
    pub cors_origins: String,

    /// Allowed CORS methods (comma-separated, or * for all).
    #[arg(
        long,
        env = "AKADEMI_CORS_METHODS",
        default_value = "GET,POST,PUT,PATCH,DELETE,OPTIONS"
    )]
    pub cors_methods: String,

    /// Allowed CORS headers (comma-separated, or * for all).
    #[arg(
        long,
        env = "AKADEMI_CORS_HEADERS",
        default_value = "Content-Type,Authorization,Accept,X-Tenant-Id,X-Auth-Subject,X-Auth-Role,X-Auth-Tenant,X-Auth-Tenants"
    )]
    pub cors_headers: String,

    /// Path prefixes exempt from the tenant gate (comma-separated).
    ///
    /// Matched case-insensitively against the request path.
    #[arg(long, env = "AKADEMI_TENANT_ALLOWLIST", default_value = DEFAULT_ALLOWLIST)]
    pub tenant_allowlist: String,

    /// Treat an empty permitted-tenant claim set as deny-all.
    ///
    /// By default an empty set places no restriction on the caller, which is
    /// the behavior expected by trusted service principals.
    #[arg(long, env = "AKADEMI_DENY_EMPTY_CLAIMS", default_value = "false")]
    pub deny_empty_claims: bool,

    /// Path to the role-capability matrix file (JSON).
    ///
    /// When absent the server starts with an empty matrix that denies every
    /// headquarters capability.
    #[arg(long, env = "AKADEMI_PERMISSION_MATRIX")]
    pub permission_matrix: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            host: "127.0.0.1".to_string(),
            log_level: "info".to_string(),
            request_timeout: 30,
            enable_cors: true,
            cors_origins: "*".to_string(),
            cors_methods: "GET,POST,PUT,PATCH,DELETE,OPTIONS".to_string(),
            cors_headers: "Content-Type,Authorization,Accept,X-Tenant-Id,X-Auth-Subject,X-Auth-Role,X-Auth-Tenant,X-Auth-Tenants".to_string(),
            tenant_allowlist: DEFAULT_ALLOWLIST.to_string(),
            deny_empty_claims: false,
            permission_matrix: None,
        }
    }
}

impl ServerConfig {
    /// Creates a new ServerConfig from environment variables.
    ///
    /// This is a convenience method that parses environment variables without
    /// requiring command line arguments.
    pub fn from_env() -> Self {
        // Try to parse from environment, falling back to defaults
        Self::try_parse().unwrap_or_default()
    }

    /// Returns the socket address to bind to.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Returns the allowlisted path prefixes, lowercased for matching.
    pub fn allowlist_prefixes(&self) -> Vec<String> {
        self.tenant_allowlist
            .split(',')
            .map(|p| p.trim().to_ascii_lowercase())
            .filter(|p| !p.is_empty())
            .collect()
    }

    /// Returns `true` when `path` is exempt from the tenant gate.
    ///
    /// Matching is by case-insensitive path prefix, so `/Swagger/index.html`
    /// passes an allowlist entry of `/swagger`.
    pub fn is_allowlisted(&self, path: &str) -> bool {
        let path = path.to_ascii_lowercase();
        self.allowlist_prefixes()
            .iter()
            .any(|prefix| path.starts_with(prefix.as_str()))
    }

    /// Returns the configured interpretation of an empty permitted-tenant set.
    pub fn empty_claims_policy(&self) -> EmptyClaimsPolicy {
        if self.deny_empty_claims {
            EmptyClaimsPolicy::Deny
        } else {
            EmptyClaimsPolicy::Unrestricted
        }
    }

    /// Validates the configuration and returns errors if any.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.port == 0 {
            errors.push("Port cannot be 0".to_string());
        }

        if self.request_timeout == 0 {
            errors.push("Request timeout cannot be 0".to_string());
        }

        for prefix in self.allowlist_prefixes() {
            if !prefix.starts_with('/') {
                errors.push(format!("Allowlist entry '{}' must start with '/'", prefix));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Creates a configuration suitable for testing.
    ///
    /// This uses ephemeral port 0 and disables features that might interfere
    /// with tests.
    pub fn for_testing() -> Self {
        Self {
            port: 0, // Let OS assign port
            host: "127.0.0.1".to_string(),
            log_level: "debug".to_string(),
            request_timeout: 5, // Shorter timeout for tests
            enable_cors: false,
            cors_origins: "*".to_string(),
            cors_methods: "*".to_string(),
            cors_headers: "*".to_string(),
            tenant_allowlist: DEFAULT_ALLOWLIST.to_string(),
            deny_empty_claims: false,
            permission_matrix: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 8080);
        assert_eq!(config.host, "127.0.0.1");
        assert!(config.enable_cors);
        assert!(!config.deny_empty_claims);
    }

    #[test]
    fn test_socket_addr() {
        let config = ServerConfig {
            port: 3000,
            host: "0.0.0.0".to_string(),
            ..Default::default()
        };
        assert_eq!(config.socket_addr(), "0.0.0.0:3000");
    }

    #[test]
    fn test_allowlist_matching() {
        let config = ServerConfig::default();
        assert!(config.is_allowlisted("/health"));
        assert!(config.is_allowlisted("/swagger/index.html"));
        assert!(config.is_allowlisted("/Swagger/index.html"));
        assert!(config.is_allowlisted("/api/auth/login"));
        assert!(!config.is_allowlisted("/api/courses"));
        assert!(!config.is_allowlisted("/hq/licenses"));
    }

    #[test]
    fn test_empty_claims_policy() {
        let config = ServerConfig::default();
        assert_eq!(
            config.empty_claims_policy(),
            EmptyClaimsPolicy::Unrestricted
        );

        let config = ServerConfig {
            deny_empty_claims: true,
            ..Default::default()
        };
        assert_eq!(config.empty_claims_policy(), EmptyClaimsPolicy::Deny);
    }

    #[test]
    fn test_validate_valid() {
        let config = ServerConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_invalid_port() {
        let config = ServerConfig {
            port: 0,
            ..Default::default()
        };
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().iter().any(|e| e.contains("Port")));
    }

    #[test]
    fn test_validate_bad_allowlist_entry() {
        let config = ServerConfig {
            tenant_allowlist: "/health,swagger".to_string(),
            ..Default::default()
        };
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().iter().any(|e| e.contains("swagger")));
    }

    #[test]
    fn test_for_testing() {
        let config = ServerConfig::for_testing();
        assert_eq!(config.port, 0);
        assert!(!config.enable_cors);
    }
}
