//! Web server setup and configuration

use crate::{routes::build_routes, state::AppState};
use axum::Router;
use schoolhub_core::{Config, Result};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Build the complete portal application from configuration
///
/// # Errors
///
/// Returns an error if the backend client cannot be built.
pub fn build_app(config: Config) -> Result<Router> {
    Ok(build_app_with_state(AppState::new(config)?))
}

/// Build the portal application around existing state
pub fn build_app_with_state(state: AppState) -> Router {
    build_routes()
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}
