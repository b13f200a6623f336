//! Error types for `SchoolHub`

use crate::types::AccountStatus;
use thiserror::Error;

/// Main error type for the approval workflow and its collaborators
///
/// None of these are fatal: the presentation layer turns them into a
/// transient notification and the operator re-issues the action.
#[derive(Error, Debug)]
pub enum Error {
    /// The acting user's role may not perform the action
    #[error("Not authorized: {0}")]
    NotAuthorized(String),

    /// No usable session was supplied
    #[error("Authentication required: {0}")]
    Unauthenticated(String),

    /// Target record does not exist
    #[error("Resource not found: {resource}")]
    NotFound {
        /// Resource that was not found
        resource: String,
    },

    /// Rejection reason was empty or whitespace
    #[error("A rejection reason is required")]
    InvalidReason,

    /// Requested decision does not change the account's status
    #[error("Cannot move account from {from} to {to}")]
    InvalidTransition {
        /// Current status
        from: AccountStatus,
        /// Requested status
        to: AccountStatus,
    },

    /// Request could not complete
    #[error("Network failure: {0}")]
    NetworkFailure(String),

    /// Backend answered with an error
    #[error("Backend rejected request ({status}): {message}")]
    BackendRejected {
        /// HTTP status code
        status: u16,
        /// Error text from the response body
        message: String,
    },

    /// Input failed validation
    #[error("Validation error: {field} - {message}")]
    Validation {
        /// Field that failed validation
        field: String,
        /// Validation error message
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Error message
        message: String,
    },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Stable machine-readable code for the error kind
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::NotAuthorized(_) => "NOT_AUTHORIZED",
            Self::Unauthenticated(_) => "UNAUTHENTICATED",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::InvalidReason => "INVALID_REASON",
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::NetworkFailure(_) => "NETWORK_FAILURE",
            Self::BackendRejected { .. } => "BACKEND_REJECTED",
            Self::Validation { .. } => "VALIDATION_FAILED",
            Self::Configuration { .. } => "CONFIGURATION_ERROR",
            Self::Serialization(_) => "SERIALIZATION_ERROR",
            Self::Io(_) => "IO_ERROR",
        }
    }

    /// Whether the error was detected before anything was sent to the backend
    #[must_use]
    pub const fn is_client_side(&self) -> bool {
        matches!(
            self,
            Self::NotAuthorized(_)
                | Self::Unauthenticated(_)
                | Self::InvalidReason
                | Self::InvalidTransition { .. }
                | Self::Validation { .. }
        )
    }

    /// Shorthand for a missing account
    pub fn account_not_found(id: impl std::fmt::Display) -> Self {
        Self::NotFound {
            resource: format!("account {id}"),
        }
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<(String, String)> = errors
            .field_errors()
            .into_iter()
            .map(|(field, list)| {
                let message = list
                    .first()
                    .map(|e| {
                        e.message
                            .as_ref()
                            .map_or_else(|| e.code.to_string(), ToString::to_string)
                    })
                    .unwrap_or_default();
                (field.to_string(), message)
            })
            .collect();
        fields.sort();

        fields.into_iter().next().map_or_else(
            || Self::Validation {
                field: "unknown".to_string(),
                message: errors.to_string(),
            },
            |(field, message)| Self::Validation { field, message },
        )
    }
}

impl From<config::ConfigError> for Error {
    fn from(err: config::ConfigError) -> Self {
        Self::Configuration {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::missing_panics_doc)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::error::Error as StdError;
    use std::io;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            Error::NotAuthorized("teacher cannot decide registration_block".to_string())
                .to_string(),
            "Not authorized: teacher cannot decide registration_block"
        );
        assert_eq!(Error::InvalidReason.to_string(), "A rejection reason is required");
        assert_eq!(
            Error::InvalidTransition {
                from: AccountStatus::Approved,
                to: AccountStatus::Approved,
            }
            .to_string(),
            "Cannot move account from approved to approved"
        );
        assert_eq!(
            Error::BackendRejected {
                status: 500,
                message: "boom".to_string(),
            }
            .to_string(),
            "Backend rejected request (500): boom"
        );
        assert_eq!(
            Error::account_not_found("u9").to_string(),
            "Resource not found: account u9"
        );
    }

    #[test]
    fn test_codes_are_distinct() {
        let errors = [
            Error::NotAuthorized(String::new()),
            Error::Unauthenticated(String::new()),
            Error::account_not_found("x"),
            Error::InvalidReason,
            Error::InvalidTransition {
                from: AccountStatus::Rejected,
                to: AccountStatus::Rejected,
            },
            Error::NetworkFailure(String::new()),
            Error::BackendRejected {
                status: 400,
                message: String::new(),
            },
            Error::Validation {
                field: String::new(),
                message: String::new(),
            },
            Error::Configuration {
                message: String::new(),
            },
        ];

        let mut codes: Vec<_> = errors.iter().map(Error::code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
    }

    #[test]
    fn test_client_side_classification() {
        assert!(Error::InvalidReason.is_client_side());
        assert!(Error::NotAuthorized(String::new()).is_client_side());
        assert!(!Error::NetworkFailure(String::new()).is_client_side());
        assert!(
            !Error::BackendRejected {
                status: 502,
                message: String::new(),
            }
            .is_client_side()
        );
    }

    #[test]
    fn test_source_chain() {
        let app_error = Error::from(io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
        assert!(app_error.source().is_some());

        let json_error = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        let app_error = Error::from(json_error);
        assert_eq!(app_error.code(), "SERIALIZATION_ERROR");
        assert!(app_error.source().is_some());

        assert!(Error::InvalidReason.source().is_none());
    }
}
