//! The approval workflow: queries over a snapshot, commands through a backend

use crate::authority;
use crate::backend::ApprovalBackend;
use crate::filter::AccountFilter;
use crate::stats::compute_stats;
use crate::transition::{self, Decision};
use chrono::Utc;
use schoolhub_core::{ApprovalAuthority, Error, Result, Session, Stats, UserAccount};
use tracing::{info, instrument, warn};

/// Drives registration decisions for one operator screen
///
/// The workflow keeps the last list fetched from its backend. Commands check
/// the operator's rights and the state machine against that snapshot, send
/// the decision, and on success replace the snapshot with a fresh fetch. A
/// failed command leaves the snapshot exactly as it was.
#[derive(Debug)]
pub struct ApprovalWorkflow<B> {
    backend: B,
    accounts: Vec<UserAccount>,
}

impl<B: ApprovalBackend> ApprovalWorkflow<B> {
    /// Create a workflow with an empty snapshot
    pub const fn new(backend: B) -> Self {
        Self {
            backend,
            accounts: Vec::new(),
        }
    }

    /// Create a workflow and load its first snapshot
    ///
    /// # Errors
    ///
    /// Returns the backend error if the initial fetch fails.
    pub async fn load(backend: B) -> Result<Self> {
        let mut workflow = Self::new(backend);
        workflow.refresh().await?;
        Ok(workflow)
    }

    /// Backend this workflow drives
    pub const fn backend(&self) -> &B {
        &self.backend
    }

    /// Current snapshot, in backend order
    pub fn accounts(&self) -> &[UserAccount] {
        &self.accounts
    }

    /// Look up an account in the snapshot
    pub fn find(&self, account_id: &str) -> Option<&UserAccount> {
        self.accounts.iter().find(|a| a.id == account_id)
    }

    /// Replace the snapshot with the backend's current list
    ///
    /// # Errors
    ///
    /// Returns the backend error; the old snapshot is kept in that case.
    pub async fn refresh(&mut self) -> Result<()> {
        let accounts = self.backend.fetch_accounts().await?;
        self.accounts = accounts;
        Ok(())
    }

    /// Pending accounts, oldest first, optionally limited to one authority
    ///
    /// Registrations with the same `created_at` keep their snapshot order.
    pub fn list_pending(&self, authority: Option<ApprovalAuthority>) -> Vec<&UserAccount> {
        let mut pending: Vec<&UserAccount> = self
            .accounts
            .iter()
            .filter(|a| a.is_pending())
            .filter(|a| authority.is_none_or(|wanted| a.approval_authority == wanted))
            .collect();
        pending.sort_by_key(|a| a.created_at);
        pending
    }

    /// Accounts matching the admin-panel filter, in snapshot order
    pub fn filtered(&self, filter: &AccountFilter) -> Vec<&UserAccount> {
        filter.apply(&self.accounts)
    }

    /// Aggregate counts over the snapshot
    pub fn stats(&self) -> Stats {
        compute_stats(&self.accounts)
    }

    /// Approve a pending or previously rejected registration
    ///
    /// # Errors
    ///
    /// [`Error::NotAuthorized`] if the actor may not decide the account,
    /// [`Error::NotFound`] if it is not in the snapshot,
    /// [`Error::InvalidTransition`] if it is already approved, or the
    /// backend's error.
    #[instrument(
        skip_all,
        fields(backend = self.backend.name(), account_id = %account_id, actor = %actor.id)
    )]
    pub async fn approve(&mut self, account_id: &str, actor: &Session) -> Result<UserAccount> {
        self.decide(account_id, actor, Decision::Approve).await
    }

    /// Reject a pending or previously approved registration
    ///
    /// A blank reason is refused before anything else is looked at.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidReason`] for a blank reason, then the same errors as
    /// [`ApprovalWorkflow::approve`].
    #[instrument(
        skip_all,
        fields(backend = self.backend.name(), account_id = %account_id, actor = %actor.id)
    )]
    pub async fn reject(
        &mut self,
        account_id: &str,
        actor: &Session,
        reason: &str,
    ) -> Result<UserAccount> {
        let decision = Decision::reject(reason)?;
        self.decide(account_id, actor, decision).await
    }

    async fn decide(
        &mut self,
        account_id: &str,
        actor: &Session,
        decision: Decision,
    ) -> Result<UserAccount> {
        authority::ensure_reviewer(actor)?;

        let current = self
            .find(account_id)
            .ok_or_else(|| Error::account_not_found(account_id))?;
        authority::ensure_can_decide(actor, current)?;

        let mut decided = current.clone();
        transition::apply(&mut decided, &decision, &actor.id, Utc::now())?;

        let sent = match &decision {
            Decision::Approve => self.backend.approve(account_id, actor).await,
            Decision::Reject { reason } => self.backend.reject(account_id, actor, reason).await,
        };
        if let Err(e) = sent {
            warn!(verb = decision.verb(), error = %e, "backend refused decision");
            return Err(e);
        }

        info!(verb = decision.verb(), status = %decided.status, "decision recorded");

        if let Err(e) = self.refresh().await {
            warn!(error = %e, "refresh after decision failed, keeping previous snapshot");
            return Ok(decided);
        }

        Ok(self.find(account_id).cloned().unwrap_or(decided))
    }
}
