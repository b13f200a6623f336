//! Aggregate counts for the admin dashboard

use schoolhub_core::{AccountStatus, Role, Stats, UserAccount};

/// Count accounts by status and role
///
/// Every role appears in `by_role`, with zero when absent from the input.
#[must_use]
pub fn compute_stats(accounts: &[UserAccount]) -> Stats {
    let mut stats = Stats {
        by_role: Role::ALL.iter().map(|role| (*role, 0)).collect(),
        ..Stats::default()
    };

    for account in accounts {
        stats.total += 1;
        match account.status {
            AccountStatus::Pending => stats.pending += 1,
            AccountStatus::Approved => stats.approved += 1,
            AccountStatus::Rejected => stats.rejected += 1,
        }
        *stats.by_role.entry(account.role).or_default() += 1;
    }

    stats
}
