//! Core data types for the `SchoolHub` approval workflow

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Opaque account identifier issued by the backend
pub type AccountId = String;

/// Role of a platform user
///
/// Some screens talk about `faculty` or `professor` accounts; on the wire
/// both are accepted as synonyms for [`Role::Teacher`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Enrolled learner
    Student,
    /// Teaching staff
    #[serde(alias = "faculty", alias = "professor")]
    Teacher,
    /// Platform administrator
    Admin,
}

impl Role {
    /// All roles, in display order
    pub const ALL: [Self; 3] = [Self::Student, Self::Teacher, Self::Admin];

    /// Wire name of the role
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Teacher => "teacher",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "student" => Ok(Self::Student),
            "teacher" | "faculty" | "professor" => Ok(Self::Teacher),
            "admin" => Ok(Self::Admin),
            other => Err(crate::Error::Validation {
                field: "role".to_string(),
                message: format!("unknown role '{other}'"),
            }),
        }
    }
}

/// Registration status of an account
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountStatus {
    /// Awaiting a decision
    #[default]
    Pending,
    /// Approved by a decider
    Approved,
    /// Rejected by a decider
    Rejected,
}

impl AccountStatus {
    /// All statuses, in lifecycle order
    pub const ALL: [Self; 3] = [Self::Pending, Self::Approved, Self::Rejected];

    /// Wire name of the status
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccountStatus {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            other => Err(crate::Error::Validation {
                field: "status".to_string(),
                message: format!("unknown status '{other}'"),
            }),
        }
    }
}

/// Which class of decider a registration is routed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalAuthority {
    /// Decided by the registration block (administrators)
    #[default]
    RegistrationBlock,
    /// Decided by faculty (teachers or administrators)
    Faculty,
}

impl ApprovalAuthority {
    /// Wire name of the authority
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RegistrationBlock => "registration_block",
            Self::Faculty => "faculty",
        }
    }
}

impl fmt::Display for ApprovalAuthority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApprovalAuthority {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "registration_block" => Ok(Self::RegistrationBlock),
            "faculty" => Ok(Self::Faculty),
            other => Err(crate::Error::Validation {
                field: "approvalAuthority".to_string(),
                message: format!("unknown approval authority '{other}'"),
            }),
        }
    }
}

/// A user account as seen by the approval screens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAccount {
    /// Backend identifier
    #[serde(alias = "_id")]
    pub id: AccountId,

    /// Display name
    pub name: String,

    /// Contact email
    pub email: String,

    /// Requested role
    pub role: Role,

    /// Current registration status
    #[serde(default)]
    pub status: AccountStatus,

    /// Who is expected to decide this registration
    #[serde(default)]
    pub approval_authority: ApprovalAuthority,

    /// When the registration was created
    pub created_at: DateTime<Utc>,

    /// Reason given by the most recent rejection, kept after re-approval
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,

    /// Id of the most recent decider
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decided_by: Option<String>,

    /// When the most recent decision was made
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decided_at: Option<DateTime<Utc>>,
}

impl UserAccount {
    /// Build a freshly registered, pending account
    pub fn pending(
        id: impl Into<AccountId>,
        name: impl Into<String>,
        email: impl Into<String>,
        role: Role,
        approval_authority: ApprovalAuthority,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            role,
            status: AccountStatus::Pending,
            approval_authority,
            created_at,
            rejection_reason: None,
            decided_by: None,
            decided_at: None,
        }
    }

    /// Whether the account is still awaiting a decision
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.status == AccountStatus::Pending
    }
}

/// Authenticated operator, supplied by the session collaborator
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// User id of the operator
    pub id: String,
    /// Role of the operator
    pub role: Role,
    /// Bearer token for backend calls
    pub token: String,
}

impl Session {
    /// Create a new session
    pub fn new(id: impl Into<String>, role: Role, token: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            role,
            token: token.into(),
        }
    }

    /// Value of the `Authorization` header for this session
    #[must_use]
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("role", &self.role)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Aggregate counts over a set of accounts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Stats {
    /// Number of accounts
    pub total: usize,
    /// Accounts awaiting a decision
    pub pending: usize,
    /// Approved accounts
    pub approved: usize,
    /// Rejected accounts
    pub rejected: usize,
    /// Account count per role
    pub by_role: BTreeMap<Role, usize>,
}

/// JSON envelope used by the backend: `{success, data}` or `{error}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    /// Explicit success flag, absent on some endpoints
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,

    /// Payload
    #[serde(default = "Option::default", skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    /// Error text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Human readable message, sometimes carried alongside errors
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    /// Failure text when the envelope reports an error
    #[must_use]
    pub fn failure(&self) -> Option<String> {
        if let Some(error) = &self.error {
            return Some(error.clone());
        }
        if self.success == Some(false) {
            return Some(
                self.message
                    .clone()
                    .unwrap_or_else(|| "request was not successful".to_string()),
            );
        }
        None
    }
}

/// Payload of `GET /api/admin/users`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UsersPayload {
    /// Every account known to the admin panel
    #[serde(default)]
    pub users: Vec<UserAccount>,
}
