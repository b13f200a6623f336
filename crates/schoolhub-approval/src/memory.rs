//! In-memory approval backend for tests and demos

use crate::backend::ApprovalBackend;
use crate::transition::{self, Decision};
use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use schoolhub_core::{Error, Result, Session, UserAccount};
use std::sync::Arc;
use tracing::debug;

/// Which calls an [`InMemoryBackend`] should fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailureMode {
    /// Everything succeeds
    #[default]
    None,
    /// Every call fails
    All,
    /// Only list fetches fail
    FetchOnly,
    /// Only approve/reject fail
    CommandsOnly,
}

/// Lock-protected account store applying the same state machine the
/// backend does
#[derive(Debug, Clone, Default)]
pub struct InMemoryBackend {
    accounts: Arc<RwLock<Vec<UserAccount>>>,
    failure: Arc<RwLock<FailureMode>>,
    pending_only: bool,
}

impl InMemoryBackend {
    /// Create a backend seeded with `accounts`
    #[must_use]
    pub fn new(accounts: Vec<UserAccount>) -> Self {
        Self {
            accounts: Arc::new(RwLock::new(accounts)),
            ..Self::default()
        }
    }

    /// Only expose pending accounts from [`ApprovalBackend::fetch_accounts`],
    /// like the registration-block endpoint does
    #[must_use]
    pub const fn pending_only(mut self) -> Self {
        self.pending_only = true;
        self
    }

    /// Change which calls fail
    pub fn set_failure(&self, mode: FailureMode) {
        *self.failure.write() = mode;
    }

    /// Current stored copy of an account
    #[must_use]
    pub fn get(&self, account_id: &str) -> Option<UserAccount> {
        self.accounts.read().iter().find(|a| a.id == account_id).cloned()
    }

    /// Every stored account, regardless of `pending_only`
    #[must_use]
    pub fn all(&self) -> Vec<UserAccount> {
        self.accounts.read().clone()
    }

    fn check_failure(&self, fetch: bool) -> Result<()> {
        let failing = match *self.failure.read() {
            FailureMode::None => false,
            FailureMode::All => true,
            FailureMode::FetchOnly => fetch,
            FailureMode::CommandsOnly => !fetch,
        };
        if failing {
            Err(Error::NetworkFailure("in-memory backend unavailable".to_string()))
        } else {
            Ok(())
        }
    }

    fn decide(&self, account_id: &str, decider: &Session, decision: &Decision) -> Result<()> {
        self.check_failure(false)?;
        let mut accounts = self.accounts.write();
        let account = accounts
            .iter_mut()
            .find(|a| a.id == account_id)
            .ok_or_else(|| Error::account_not_found(account_id))?;
        transition::apply(account, decision, &decider.id, Utc::now())?;
        debug!(account_id, decider = %decider.id, status = %account.status, "stored decision");
        Ok(())
    }
}

#[async_trait]
impl ApprovalBackend for InMemoryBackend {
    async fn fetch_accounts(&self) -> Result<Vec<UserAccount>> {
        self.check_failure(true)?;
        let accounts = self.accounts.read();
        Ok(accounts
            .iter()
            .filter(|a| !self.pending_only || a.is_pending())
            .cloned()
            .collect())
    }

    async fn approve(&self, account_id: &str, decider: &Session) -> Result<()> {
        self.decide(account_id, decider, &Decision::Approve)
    }

    async fn reject(&self, account_id: &str, decider: &Session, reason: &str) -> Result<()> {
        self.decide(account_id, decider, &Decision::reject(reason)?)
    }

    fn name(&self) -> &str {
        if self.pending_only {
            "in-memory/pending"
        } else {
            "in-memory"
        }
    }
}
