//! Approval backends speaking to the REST API
//!
//! The same decisions can be taken from two screens. The admin panel sees
//! every account and uses `/api/admin/users*`; the registration block only
//! sees pending registrations and uses `/api/approvals*`, naming the decider
//! in the request body.

use crate::api_client::ApiClient;
use async_trait::async_trait;
use schoolhub_approval::ApprovalBackend;
use schoolhub_core::{Result, Session, UserAccount};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Which family of backend endpoints a workflow runs against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Surface {
    /// `/api/admin/users*`, every account
    #[serde(alias = "admin_panel")]
    Admin,
    /// `/api/approvals*`, pending registrations only
    #[default]
    #[serde(alias = "registration-block")]
    RegistrationBlock,
}

impl Surface {
    /// Wire name of the surface
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::RegistrationBlock => "registration_block",
        }
    }

    /// Backend for this surface, authenticated as `session`
    #[must_use]
    pub fn backend(self, client: &ApiClient, session: &Session) -> Arc<dyn ApprovalBackend> {
        let client = client.for_session(session);
        match self {
            Self::Admin => Arc::new(AdminPanelBackend::new(client)),
            Self::RegistrationBlock => Arc::new(RegistrationBlockBackend::new(client)),
        }
    }
}

impl fmt::Display for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Surface {
    type Err = schoolhub_core::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "admin" | "admin_panel" => Ok(Self::Admin),
            "registration_block" => Ok(Self::RegistrationBlock),
            other => Err(schoolhub_core::Error::Validation {
                field: "surface".to_string(),
                message: format!("unknown surface '{other}'"),
            }),
        }
    }
}

/// Admin-panel endpoints
#[derive(Debug, Clone)]
pub struct AdminPanelBackend {
    client: ApiClient,
}

impl AdminPanelBackend {
    /// Wrap an authenticated client
    #[must_use]
    pub const fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ApprovalBackend for AdminPanelBackend {
    async fn fetch_accounts(&self) -> Result<Vec<UserAccount>> {
        self.client.list_users().await
    }

    async fn approve(&self, account_id: &str, _decider: &Session) -> Result<()> {
        self.client.approve_user(account_id).await
    }

    async fn reject(&self, account_id: &str, _decider: &Session, reason: &str) -> Result<()> {
        self.client.reject_user(account_id, reason).await
    }

    fn name(&self) -> &str {
        Surface::Admin.as_str()
    }
}

/// Registration-block endpoints
#[derive(Debug, Clone)]
pub struct RegistrationBlockBackend {
    client: ApiClient,
}

impl RegistrationBlockBackend {
    /// Wrap an authenticated client
    #[must_use]
    pub const fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ApprovalBackend for RegistrationBlockBackend {
    async fn fetch_accounts(&self) -> Result<Vec<UserAccount>> {
        self.client.registration_block_pending().await
    }

    async fn approve(&self, account_id: &str, decider: &Session) -> Result<()> {
        self.client.approve_registration(account_id, &decider.id).await
    }

    async fn reject(&self, account_id: &str, decider: &Session, reason: &str) -> Result<()> {
        self.client
            .reject_registration(account_id, reason, &decider.id)
            .await
    }

    fn name(&self) -> &str {
        Surface::RegistrationBlock.as_str()
    }
}
