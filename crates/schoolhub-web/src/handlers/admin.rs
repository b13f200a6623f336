//! Admin panel: filtered account list and statistics

use super::{ApiResult, Success, ensure_admin};
use crate::{backend::Surface, session::OperatorSession, state::AppState};
use axum::extract::{Query, State};
use schoolhub_approval::{AccountFilter, ApprovalWorkflow, StatusFilter};
use schoolhub_core::{Stats, UsersPayload};
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

/// Query parameters for `GET /admin/users`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UsersQuery {
    /// `pending`, `approved`, `rejected` or `all`
    #[serde(default)]
    pub status: Option<String>,
    /// Case-insensitive substring of name or email
    #[serde(default)]
    pub search: Option<String>,
}

/// List every account, filtered by status and search term
pub async fn list_users(
    State(state): State<Arc<AppState>>,
    OperatorSession(session): OperatorSession,
    Query(query): Query<UsersQuery>,
) -> ApiResult<UsersPayload> {
    ensure_admin(&session)?;
    let status: StatusFilter = query.status.as_deref().unwrap_or_default().parse()?;
    let filter = AccountFilter::new(status, query.search.unwrap_or_default());

    let backend = Surface::Admin.backend(&state.api_client, &session);
    let workflow = ApprovalWorkflow::load(backend).await?;
    let users: Vec<_> = workflow.filtered(&filter).into_iter().cloned().collect();
    debug!(%status, matched = users.len(), total = workflow.accounts().len(), "filtered accounts");

    Ok(Success::new(UsersPayload { users }))
}

/// Aggregate counts over every account
pub async fn stats(
    State(state): State<Arc<AppState>>,
    OperatorSession(session): OperatorSession,
) -> ApiResult<Stats> {
    ensure_admin(&session)?;
    let backend = Surface::Admin.backend(&state.api_client, &session);
    let workflow = ApprovalWorkflow::load(backend).await?;
    Ok(Success::new(workflow.stats()))
}
