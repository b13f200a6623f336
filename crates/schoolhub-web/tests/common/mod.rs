//! Shared fixtures for the web integration tests

#![allow(dead_code, unreachable_pub, clippy::unwrap_used)]

use schoolhub_core::{Config, Role, Session};
use schoolhub_web::{ApiClient, AppState};
use serde_json::{Value, json};
use wiremock::MockServer;

/// Backend JSON for an account
pub fn account_json(id: &str, name: &str, status: &str, authority: &str, created: &str) -> Value {
    json!({
        "_id": id,
        "name": name,
        "email": format!("{}@school.test", name.to_lowercase()),
        "role": "student",
        "status": status,
        "approvalAuthority": authority,
        "createdAt": created,
    })
}

/// Admin-panel list: Anna and Bob pending, a second Anna approved
pub fn admin_users() -> Value {
    json!({
        "success": true,
        "data": {
            "users": [
                account_json("1", "Anna", "pending", "registration_block", "2024-09-01T10:00:00Z"),
                account_json("2", "Bob", "pending", "faculty", "2024-09-01T09:00:00Z"),
                {
                    "_id": "3",
                    "name": "Anna",
                    "email": "anna2@school.test",
                    "role": "teacher",
                    "status": "approved",
                    "approvalAuthority": "faculty",
                    "createdAt": "2024-08-30T12:00:00Z"
                }
            ]
        }
    })
}

/// Registration-block list of pending registrations
pub fn registration_block(ids: &[&str]) -> Value {
    let data: Vec<Value> = ids
        .iter()
        .map(|id| {
            account_json(
                id,
                &format!("Registrant{id}"),
                "pending",
                "registration_block",
                "2024-09-02T08:00:00Z",
            )
        })
        .collect();
    json!({ "data": data })
}

/// Administrator session
pub fn admin() -> Session {
    Session::new("admin-1", Role::Admin, "admin-token")
}

/// Teacher session
pub fn teacher() -> Session {
    Session::new("teacher-1", Role::Teacher, "teacher-token")
}

/// Client pointed at the mock backend, authenticated as `session`
pub fn client_for(server: &MockServer, session: &Session) -> ApiClient {
    ApiClient::new(server.uri()).for_session(session)
}

/// Portal state forwarding to the mock backend
pub fn state_for(server: &MockServer) -> AppState {
    let mut config = Config::default();
    config.backend.base_url = server.uri();
    AppState::new(config).unwrap()
}
