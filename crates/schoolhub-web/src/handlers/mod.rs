//! HTTP handlers for the portal service

pub mod admin;
pub mod approvals;
pub mod health;
pub mod settings;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use schoolhub_core::{Error, Role, Session};
use serde::Serialize;
use std::fmt;
use tracing::{debug, error, warn};

/// Error returned by every handler
#[derive(Debug)]
pub struct ApiError(pub Error);

/// JSON body of an error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Always `false`
    pub success: bool,
    /// Human readable message
    pub error: String,
    /// Stable machine readable code
    pub code: &'static str,
}

impl ApiError {
    /// HTTP status for the wrapped error
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match &self.0 {
            Error::NotAuthorized(_) => StatusCode::FORBIDDEN,
            Error::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            Error::NotFound { .. } => StatusCode::NOT_FOUND,
            Error::InvalidReason | Error::InvalidTransition { .. } | Error::Validation { .. } => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            Error::BackendRejected { .. } => StatusCode::BAD_GATEWAY,
            Error::NetworkFailure(_) => StatusCode::SERVICE_UNAVAILABLE,
            Error::Configuration { .. } | Error::Serialization(_) | Error::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Machine readable code for the wrapped error
    #[must_use]
    pub const fn code(&self) -> &'static str {
        self.0.code()
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<Error> for ApiError {
    fn from(error: Error) -> Self {
        Self(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if self.0.is_client_side() {
            debug!(code = self.code(), error = %self.0, "request refused");
        } else if status.is_server_error() {
            error!(code = self.code(), error = %self.0, "request failed");
        } else {
            warn!(code = self.code(), error = %self.0, "request failed");
        }

        let body = ErrorResponse {
            success: false,
            error: self.0.to_string(),
            code: self.code(),
        };
        (status, Json(body)).into_response()
    }
}

/// Require an administrator session
pub(crate) fn ensure_admin(session: &Session) -> Result<(), Error> {
    if session.role == Role::Admin {
        Ok(())
    } else {
        Err(Error::NotAuthorized(format!(
            "role '{}' may not open the admin panel",
            session.role
        )))
    }
}

/// Successful JSON body: `{success: true, data}`
#[derive(Debug, Serialize)]
pub struct Success<T> {
    /// Always `true`
    pub success: bool,
    /// Payload
    pub data: T,
}

impl<T: Serialize> Success<T> {
    /// Wrap a payload
    pub const fn new(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            data,
        })
    }
}

/// Result type returned by handlers
pub type ApiResult<T> = std::result::Result<Json<Success<T>>, ApiError>;
