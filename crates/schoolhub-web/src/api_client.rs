//! HTTP client for the `SchoolHub` REST backend

use reqwest::{Client, Method, RequestBuilder, StatusCode};
use schoolhub_core::config::BackendConfig;
use schoolhub_core::{
    AccountSettings, Envelope, Error, PasswordChange, Result, Session, Stats, UserAccount,
    UsersPayload,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AdminRejectBody<'a> {
    rejection_reason: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ApproveBody<'a> {
    approved_by: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RejectBody<'a> {
    rejection_reason: &'a str,
    rejected_by: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordBody<'a> {
    current_password: &'a str,
    new_password: &'a str,
}

/// API client for making HTTP requests to the `SchoolHub` backend
///
/// Every request carries `Authorization: Bearer <token>`; build a per-operator
/// client with [`ApiClient::for_session`].
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("authenticated", &self.token.is_some())
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a new API client with default transport settings
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        }
    }

    /// Create a client honouring the configured timeouts
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the HTTP client cannot be built.
    pub fn from_config(config: &BackendConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .connect_timeout(config.connect_timeout())
            .build()
            .map_err(|e| Error::Configuration {
                message: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: None,
        })
    }

    /// Set the bearer token for authentication
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Clone of this client authenticated as the session's operator
    #[must_use]
    pub fn for_session(&self, session: &Session) -> Self {
        self.clone().with_token(session.token.clone())
    }

    /// Backend base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let token = self.token.as_ref().ok_or_else(|| {
            Error::Unauthenticated("no session token for backend request".to_string())
        })?;
        let url = format!("{}{path}", self.base_url);
        debug!(%method, %url, "backend request");
        Ok(self.client.request(method, url).bearer_auth(token))
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        what: &str,
    ) -> Result<Envelope<T>> {
        let response = request
            .send()
            .await
            .map_err(|e| Error::NetworkFailure(format!("Failed to {what}: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::NetworkFailure(format!("Failed to read response to {what}: {e}")))?;

        if !status.is_success() {
            let message = serde_json::from_str::<Envelope<serde_json::Value>>(&body)
                .ok()
                .and_then(|envelope| envelope.failure().or(envelope.message))
                .unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .unwrap_or("unexpected status")
                        .to_string()
                });
            warn!(status = status.as_u16(), %message, "backend refused request to {what}");

            if status == StatusCode::NOT_FOUND {
                return Err(Error::NotFound { resource: message });
            }
            return Err(Error::BackendRejected {
                status: status.as_u16(),
                message,
            });
        }

        if body.trim().is_empty() {
            return Ok(Envelope {
                success: None,
                data: None,
                error: None,
                message: None,
            });
        }

        let envelope: Envelope<T> = serde_json::from_str(&body)?;
        if let Some(message) = envelope.failure() {
            warn!(status = status.as_u16(), %message, "backend reported failure to {what}");
            return Err(Error::BackendRejected {
                status: status.as_u16(),
                message,
            });
        }

        Ok(envelope)
    }

    fn encoded(id: &str) -> String {
        urlencoding::encode(id).into_owned()
    }

    /// Every account visible to the admin panel
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails or the response cannot be parsed.
    pub async fn list_users(&self) -> Result<Vec<UserAccount>> {
        let request = self.request(Method::GET, "/api/admin/users")?;
        let envelope: Envelope<UsersPayload> = self.send(request, "fetch users").await?;
        Ok(envelope.data.unwrap_or_default().users)
    }

    /// Aggregate statistics as computed by the backend
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails or the response cannot be parsed.
    pub async fn admin_stats(&self) -> Result<Stats> {
        let request = self.request(Method::GET, "/api/admin/stats")?;
        let envelope: Envelope<Stats> = self.send(request, "fetch stats").await?;
        Ok(envelope.data.unwrap_or_default())
    }

    /// Approve a user from the admin panel
    ///
    /// # Errors
    ///
    /// Returns an error if the backend refuses the decision or is unreachable.
    pub async fn approve_user(&self, account_id: &str) -> Result<()> {
        let path = format!("/api/admin/users/{}/approve", Self::encoded(account_id));
        let request = self.request(Method::PUT, &path)?;
        self.send::<serde_json::Value>(request, "approve user").await?;
        Ok(())
    }

    /// Reject a user from the admin panel
    ///
    /// # Errors
    ///
    /// Returns an error if the backend refuses the decision or is unreachable.
    pub async fn reject_user(&self, account_id: &str, reason: &str) -> Result<()> {
        let path = format!("/api/admin/users/{}/reject", Self::encoded(account_id));
        let request = self.request(Method::PUT, &path)?.json(&AdminRejectBody {
            rejection_reason: reason,
        });
        self.send::<serde_json::Value>(request, "reject user").await?;
        Ok(())
    }

    /// Pending registrations routed to the registration block
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails or the response cannot be parsed.
    pub async fn registration_block_pending(&self) -> Result<Vec<UserAccount>> {
        let request = self.request(Method::GET, "/api/approvals/registration-block")?;
        let envelope: Envelope<Vec<UserAccount>> =
            self.send(request, "fetch pending registrations").await?;
        Ok(envelope.data.unwrap_or_default())
    }

    /// Approve a registration, naming the decider
    ///
    /// # Errors
    ///
    /// Returns an error if the backend refuses the decision or is unreachable.
    pub async fn approve_registration(&self, account_id: &str, approved_by: &str) -> Result<()> {
        let path = format!("/api/approvals/{}/approve", Self::encoded(account_id));
        let request = self
            .request(Method::PUT, &path)?
            .json(&ApproveBody { approved_by });
        self.send::<serde_json::Value>(request, "approve registration")
            .await?;
        Ok(())
    }

    /// Reject a registration, naming the decider and the reason
    ///
    /// # Errors
    ///
    /// Returns an error if the backend refuses the decision or is unreachable.
    pub async fn reject_registration(
        &self,
        account_id: &str,
        reason: &str,
        rejected_by: &str,
    ) -> Result<()> {
        let path = format!("/api/approvals/{}/reject", Self::encoded(account_id));
        let request = self.request(Method::PUT, &path)?.json(&RejectBody {
            rejection_reason: reason,
            rejected_by,
        });
        self.send::<serde_json::Value>(request, "reject registration")
            .await?;
        Ok(())
    }

    /// Save the operator's account settings
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] without contacting the backend if the
    /// settings are invalid, otherwise any backend or network error.
    pub async fn save_settings(&self, user_id: &str, settings: &AccountSettings) -> Result<()> {
        settings.check()?;
        let path = format!("/api/users/{}/settings", Self::encoded(user_id));
        let request = self.request(Method::PUT, &path)?.json(settings);
        self.send::<serde_json::Value>(request, "save settings").await?;
        Ok(())
    }

    /// Change the operator's password
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] without contacting the backend if the
    /// request is invalid, otherwise any backend or network error.
    pub async fn change_password(&self, user_id: &str, change: &PasswordChange) -> Result<()> {
        change.check()?;
        let path = format!("/api/users/{}/password", Self::encoded(user_id));
        let request = self.request(Method::PUT, &path)?.json(&PasswordBody {
            current_password: &change.current_password,
            new_password: &change.new_password,
        });
        self.send::<serde_json::Value>(request, "change password")
            .await?;
        Ok(())
    }
}
