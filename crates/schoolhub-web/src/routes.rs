//! Route definitions for the portal service

use crate::{
    handlers::{admin, approvals, health, settings},
    state::AppState,
};
use axum::{
    Router,
    routing::{get, post, put},
};
use std::sync::Arc;

/// Build the portal router
pub fn build_routes() -> Router<Arc<AppState>> {
    Router::new()
        // Admin panel
        .route("/admin/users", get(admin::list_users))
        .route("/admin/stats", get(admin::stats))
        // Approval queue
        .route("/approvals/pending", get(approvals::pending))
        .route("/approvals/:id/approve", post(approvals::approve))
        .route("/approvals/:id/reject", post(approvals::reject))
        // Settings screen
        .route("/settings", put(settings::save))
        .route("/settings/password", put(settings::change_password))
        // Health check
        .route("/health", get(health::health_check))
}
