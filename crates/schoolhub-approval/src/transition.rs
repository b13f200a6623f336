//! Registration status state machine
//!
//! ```text
//!            approve                reject
//! pending ───────────▶ approved ◀─────────▶ rejected
//!    │                              approve     ▲
//!    └──────────────────────────────────────────┘
//!                     reject
//! ```
//!
//! There is no terminal state and no self-transition.

use chrono::{DateTime, Utc};
use schoolhub_core::{AccountStatus, Error, Result, UserAccount};

/// A decision taken on a registration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Approve the registration
    Approve,
    /// Reject the registration with an audit reason
    Reject {
        /// Why the registration was rejected, already trimmed and non-empty
        reason: String,
    },
}

impl Decision {
    /// Build a rejection, refusing blank reasons
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidReason`] when the reason is empty or whitespace.
    pub fn reject(reason: &str) -> Result<Self> {
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(Error::InvalidReason);
        }
        Ok(Self::Reject {
            reason: reason.to_string(),
        })
    }

    /// Status the decision leads to
    #[must_use]
    pub const fn target(&self) -> AccountStatus {
        match self {
            Self::Approve => AccountStatus::Approved,
            Self::Reject { .. } => AccountStatus::Rejected,
        }
    }

    /// Verb used in logs
    #[must_use]
    pub const fn verb(&self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Reject { .. } => "reject",
        }
    }
}

/// Check that `decision` is a legal move from `from`
///
/// # Errors
///
/// Returns [`Error::InvalidTransition`] when the account is already in the
/// decision's target status.
pub fn check(from: AccountStatus, decision: &Decision) -> Result<AccountStatus> {
    let to = decision.target();
    match (from, to) {
        (AccountStatus::Pending | AccountStatus::Rejected, AccountStatus::Approved)
        | (AccountStatus::Pending | AccountStatus::Approved, AccountStatus::Rejected) => Ok(to),
        _ => Err(Error::InvalidTransition { from, to }),
    }
}

/// Apply a decision to an account, recording the decider
///
/// The rejection reason of an earlier rejection is kept when the account is
/// later approved. The approval authority is never touched.
///
/// # Errors
///
/// Returns [`Error::InvalidTransition`] if the move is not allowed; the
/// account is left unchanged in that case.
pub fn apply(
    account: &mut UserAccount,
    decision: &Decision,
    decider: &str,
    at: DateTime<Utc>,
) -> Result<()> {
    account.status = check(account.status, decision)?;
    if let Decision::Reject { reason } = decision {
        account.rejection_reason = Some(reason.clone());
    }
    account.decided_by = Some(decider.to_string());
    account.decided_at = Some(at);
    Ok(())
}
