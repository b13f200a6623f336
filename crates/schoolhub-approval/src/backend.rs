//! Backend seam for the approval workflow
//!
//! The workflow never talks HTTP itself. It reads and mutates registrations
//! through this trait so the same rules run against the admin-panel
//! endpoints, the registration-block endpoints, or an in-memory store.

use async_trait::async_trait;
use schoolhub_core::{Result, Session, UserAccount};

/// Source of truth for registrations
#[async_trait]
pub trait ApprovalBackend: Send + Sync {
    /// Fetch the full list of accounts this surface exposes
    ///
    /// Some surfaces only return pending registrations.
    async fn fetch_accounts(&self) -> Result<Vec<UserAccount>>;

    /// Approve a registration on behalf of `decider`
    async fn approve(&self, account_id: &str, decider: &Session) -> Result<()>;

    /// Reject a registration on behalf of `decider`
    ///
    /// `reason` has already been checked to be non-blank.
    async fn reject(&self, account_id: &str, decider: &Session, reason: &str) -> Result<()>;

    /// Short name used in logs
    fn name(&self) -> &str;
}

#[async_trait]
impl<B> ApprovalBackend for std::sync::Arc<B>
where
    B: ApprovalBackend + ?Sized,
{
    async fn fetch_accounts(&self) -> Result<Vec<UserAccount>> {
        (**self).fetch_accounts().await
    }

    async fn approve(&self, account_id: &str, decider: &Session) -> Result<()> {
        (**self).approve(account_id, decider).await
    }

    async fn reject(&self, account_id: &str, decider: &Session, reason: &str) -> Result<()> {
        (**self).reject(account_id, decider, reason).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
