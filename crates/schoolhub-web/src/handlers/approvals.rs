//! Approval queue and decisions

use super::{ApiResult, Success, ensure_admin};
use crate::{backend::Surface, extractors::JsonBody, session::OperatorSession, state::AppState};
use axum::extract::{Path, Query, State};
use schoolhub_approval::{ApprovalWorkflow, Decision, authority};
use schoolhub_core::{ApprovalAuthority, Result, Session, UserAccount};
use serde::Deserialize;
use std::sync::Arc;

/// Query parameters for `GET /approvals/pending`
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PendingQuery {
    /// Endpoint family to read from
    #[serde(default)]
    pub surface: Surface,
    /// Only registrations routed to this authority
    #[serde(default)]
    pub authority: Option<ApprovalAuthority>,
}

/// Query parameters for decision routes
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct SurfaceQuery {
    /// Endpoint family to send the decision to
    #[serde(default)]
    pub surface: Surface,
}

/// Body of `POST /approvals/:id/reject`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RejectRequest {
    /// Why the registration is rejected
    #[serde(default)]
    pub reason: String,
}

/// Reviewer rights, plus admin rights when reading the admin panel's endpoints
fn ensure_surface_access(session: &Session, surface: Surface) -> Result<()> {
    authority::ensure_reviewer(session)?;
    if surface == Surface::Admin {
        ensure_admin(session)?;
    }
    Ok(())
}

/// Pending registrations, oldest first
pub async fn pending(
    State(state): State<Arc<AppState>>,
    OperatorSession(session): OperatorSession,
    Query(query): Query<PendingQuery>,
) -> ApiResult<Vec<UserAccount>> {
    ensure_surface_access(&session, query.surface)?;
    let backend = query.surface.backend(&state.api_client, &session);
    let workflow = ApprovalWorkflow::load(backend).await?;
    let pending = workflow
        .list_pending(query.authority)
        .into_iter()
        .cloned()
        .collect();
    Ok(Success::new(pending))
}

/// Approve a registration
pub async fn approve(
    State(state): State<Arc<AppState>>,
    OperatorSession(session): OperatorSession,
    Path(account_id): Path<String>,
    Query(query): Query<SurfaceQuery>,
) -> ApiResult<UserAccount> {
    ensure_surface_access(&session, query.surface)?;
    let backend = query.surface.backend(&state.api_client, &session);
    let mut workflow = ApprovalWorkflow::load(backend).await?;
    let account = workflow.approve(&account_id, &session).await?;
    Ok(Success::new(account))
}

/// Reject a registration with a reason
///
/// A blank reason is refused before the backend is contacted.
pub async fn reject(
    State(state): State<Arc<AppState>>,
    OperatorSession(session): OperatorSession,
    Path(account_id): Path<String>,
    Query(query): Query<SurfaceQuery>,
    JsonBody(request): JsonBody<RejectRequest>,
) -> ApiResult<UserAccount> {
    Decision::reject(&request.reason)?;
    ensure_surface_access(&session, query.surface)?;

    let backend = query.surface.backend(&state.api_client, &session);
    let mut workflow = ApprovalWorkflow::load(backend).await?;
    let account = workflow
        .reject(&account_id, &session, &request.reason)
        .await?;
    Ok(Success::new(account))
}
