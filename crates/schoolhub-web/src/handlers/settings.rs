//! Settings screen mutations

use super::{ApiResult, Success};
use crate::{extractors::JsonBody, session::OperatorSession, state::AppState};
use axum::extract::State;
use schoolhub_core::{AccountSettings, PasswordChange};
use std::sync::Arc;
use tracing::info;

/// Save the operator's settings
pub async fn save(
    State(state): State<Arc<AppState>>,
    OperatorSession(session): OperatorSession,
    JsonBody(settings): JsonBody<AccountSettings>,
) -> ApiResult<AccountSettings> {
    state
        .api_client
        .for_session(&session)
        .save_settings(&session.id, &settings)
        .await?;
    info!(user_id = %session.id, "settings saved");
    Ok(Success::new(settings))
}

/// Change the operator's password
pub async fn change_password(
    State(state): State<Arc<AppState>>,
    OperatorSession(session): OperatorSession,
    JsonBody(change): JsonBody<PasswordChange>,
) -> ApiResult<()> {
    state
        .api_client
        .for_session(&session)
        .change_password(&session.id, &change)
        .await?;
    info!(user_id = %session.id, "password changed");
    Ok(Success::new(()))
}
