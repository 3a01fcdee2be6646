//! Headquarters license operation handlers.
//!
//! Every operation here is privileged: the caller's role is checked against
//! the permission matrix before any state changes, and an audit entry is
//! recorded for each completed action. Audit failure downgrades to a WARN
//! and never alters the operation's outcome.

use akademi_core::audit::{AuditEntry, record_or_warn};
use akademi_core::permissions::Capability;
use akademi_core::tenant::{self, TenantId};
use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::{info, warn};

use crate::error::{RestError, RestResult};
use crate::extractors::IdentityExtractor;
use crate::licenses::License;
use crate::state::AppState;

/// Request body for license creation.
#[derive(Debug, Deserialize)]
pub struct CreateLicenseRequest {
    /// Tenant the license is issued to.
    pub tenant_id: TenantId,
    /// Commercial plan name.
    pub plan: String,
}

/// Request body for impersonation.
#[derive(Debug, Deserialize)]
pub struct ImpersonateRequest {
    /// Tenant to act as for the remainder of the request.
    pub tenant_id: TenantId,
}

/// Checks the caller's role against the matrix, failing closed.
///
/// Runs before any side effect in every headquarters handler. A missing or
/// unknown role denies.
fn require_capability(
    state: &AppState,
    identity: &IdentityExtractor,
    capability: Capability,
) -> RestResult<()> {
    if state.matrix().allows(identity.role(), capability) {
        Ok(())
    } else {
        warn!(
            subject = identity.subject(),
            role = identity.role().unwrap_or("<none>"),
            capability = %capability,
            "Capability denied"
        );
        Err(RestError::Forbidden {
            message: format!(
                "Role '{}' lacks the '{}' capability",
                identity.role().unwrap_or("<none>"),
                capability
            ),
        })
    }
}

/// Handler for license creation.
///
/// # HTTP Request
///
/// `POST [base]/hq/licenses`
///
/// # Response
///
/// - `201 Created` - License issued; body is the license
/// - `403 Forbidden` - Caller's role lacks the create capability
pub async fn create_license_handler(
    State(state): State<AppState>,
    identity: IdentityExtractor,
    Json(body): Json<CreateLicenseRequest>,
) -> RestResult<Response> {
    require_capability(&state, &identity, Capability::Create)?;

    if body.plan.trim().is_empty() {
        return Err(RestError::BadRequest {
            message: "Plan must not be empty".to_string(),
        });
    }

    let license = License::issue(body.tenant_id.clone(), body.plan);
    state.licenses().add(license.clone());

    info!(
        license_id = %license.id,
        tenant_id = %license.tenant_id,
        "License created"
    );

    let entry = AuditEntry::new("license.create", identity.subject(), "License")
        .with_tenant(license.tenant_id.clone())
        .with_entity_id(license.id.to_string())
        .with_metadata(serde_json::json!({ "plan": license.plan }));
    let entry = match identity.role() {
        Some(role) => entry.with_actor_role(role),
        None => entry,
    };
    record_or_warn(state.audit(), entry).await;

    Ok((StatusCode::CREATED, Json(license)).into_response())
}

/// Handler for license export.
///
/// Returns every license across all tenants, so the audit entry is recorded
/// without tenant attribution.
///
/// # HTTP Request
///
/// `GET [base]/hq/licenses/export`
pub async fn export_licenses_handler(
    State(state): State<AppState>,
    identity: IdentityExtractor,
) -> RestResult<Response> {
    require_capability(&state, &identity, Capability::ExportData)?;

    let licenses = state.licenses().all();

    let entry = AuditEntry::new("license.export", identity.subject(), "License")
        .cross_tenant()
        .with_metadata(serde_json::json!({ "count": licenses.len() }));
    let entry = match identity.role() {
        Some(role) => entry.with_actor_role(role),
        None => entry,
    };
    record_or_warn(state.audit(), entry).await;

    Ok((StatusCode::OK, Json(licenses)).into_response())
}

/// Handler for license import.
///
/// # HTTP Request
///
/// `POST [base]/hq/licenses/import`
///
/// # Response
///
/// - `200 OK` - Body reports how many licenses were imported
pub async fn import_licenses_handler(
    State(state): State<AppState>,
    identity: IdentityExtractor,
    Json(licenses): Json<Vec<License>>,
) -> RestResult<Response> {
    require_capability(&state, &identity, Capability::ImportData)?;

    let imported = state.licenses().add_all(licenses);
    info!(imported, "Licenses imported");

    let entry = AuditEntry::new("license.import", identity.subject(), "License")
        .cross_tenant()
        .with_metadata(serde_json::json!({ "count": imported }));
    let entry = match identity.role() {
        Some(role) => entry.with_actor_role(role),
        None => entry,
    };
    record_or_warn(state.audit(), entry).await;

    Ok((
        StatusCode::OK,
        Json(serde_json::json!({ "imported": imported })),
    )
        .into_response())
}

/// Handler for tenant impersonation.
///
/// Switches the ambient tenant for the remainder of the request, so
/// downstream reads (and the gate's response echo) see the target tenant.
/// The switch is recorded against the target tenant with the impersonator
/// in the metadata.
///
/// # HTTP Request
///
/// `POST [base]/hq/impersonate`
pub async fn impersonate_handler(
    State(state): State<AppState>,
    identity: IdentityExtractor,
    Json(body): Json<ImpersonateRequest>,
) -> RestResult<Response> {
    require_capability(&state, &identity, Capability::Impersonate)?;

    let previous = tenant::current();
    tenant::set(body.tenant_id.clone());

    info!(
        subject = identity.subject(),
        from = %previous,
        to = %body.tenant_id,
        "Tenant impersonation"
    );

    let entry = AuditEntry::new("hq.impersonate", identity.subject(), "Tenant")
        .with_tenant(body.tenant_id.clone())
        .with_entity_id(body.tenant_id.to_string())
        .with_metadata(serde_json::json!({ "previous_tenant": previous.as_str() }));
    let entry = match identity.role() {
        Some(role) => entry.with_actor_role(role),
        None => entry,
    };
    record_or_warn(state.audit(), entry).await;

    Ok((
        StatusCode::OK,
        Json(serde_json::json!({
            "tenant": body.tenant_id.as_str(),
            "actor": identity.subject(),
        })),
    )
        .into_response())
}
