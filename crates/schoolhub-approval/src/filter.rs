//! List filtering for the admin panel

use schoolhub_core::{AccountStatus, Error, UserAccount};
use std::fmt;
use std::str::FromStr;

/// Status filter, either one status or the `all` wildcard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    /// Match every status
    #[default]
    All,
    /// Match a single status
    Only(AccountStatus),
}

impl StatusFilter {
    /// Whether `status` passes the filter
    #[must_use]
    pub fn matches(self, status: AccountStatus) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == status,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            Ok(Self::All)
        } else {
            s.parse().map(Self::Only)
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Only(status) => fmt::Display::fmt(status, f),
        }
    }
}

/// Status filter combined with a free-text search over name and email
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountFilter {
    status: StatusFilter,
    needle: String,
}

impl AccountFilter {
    /// Build a filter; the search term is matched case-insensitively
    pub fn new(status: StatusFilter, search: impl AsRef<str>) -> Self {
        Self {
            status,
            needle: search.as_ref().trim().to_lowercase(),
        }
    }

    /// Whether the account passes both the status and the search test
    #[must_use]
    pub fn matches(&self, account: &UserAccount) -> bool {
        self.status.matches(account.status)
            && (self.needle.is_empty()
                || account.name.to_lowercase().contains(&self.needle)
                || account.email.to_lowercase().contains(&self.needle))
    }

    /// Matching accounts, in input order
    pub fn apply<'a>(&self, accounts: &'a [UserAccount]) -> Vec<&'a UserAccount> {
        accounts.iter().filter(|a| self.matches(a)).collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::missing_panics_doc, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pretty_assertions::assert_eq;
    use schoolhub_core::{ApprovalAuthority, Role};

    fn account(id: &str, name: &str, email: &str, status: AccountStatus) -> UserAccount {
        let mut account = UserAccount::pending(
            id,
            name,
            email,
            Role::Student,
            ApprovalAuthority::RegistrationBlock,
            Utc::now(),
        );
        account.status = status;
        account
    }

    #[test]
    fn test_pending_search_picks_single_record() {
        let accounts = vec![
            account("1", "Anna", "anna@school.test", AccountStatus::Pending),
            account("2", "Bob", "bob@school.test", AccountStatus::Pending),
            account("3", "Anna", "anna.k@school.test", AccountStatus::Approved),
        ];

        let filter = AccountFilter::new(StatusFilter::Only(AccountStatus::Pending), "ann");
        let hits = filter.apply(&accounts);

        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "1");
    }

    #[test]
    fn test_search_matches_email_case_insensitively() {
        let accounts = vec![
            account("1", "Carl", "CARL.Smith@School.test", AccountStatus::Rejected),
            account("2", "Dina", "dina@school.test", AccountStatus::Approved),
        ];

        let hits = AccountFilter::new(StatusFilter::All, "smith").apply(&accounts);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "1");
    }

    #[test]
    fn test_empty_search_and_wildcard_match_everything() {
        let accounts = vec![
            account("1", "Carl", "carl@school.test", AccountStatus::Rejected),
            account("2", "Dina", "dina@school.test", AccountStatus::Approved),
        ];
        assert_eq!(AccountFilter::default().apply(&accounts).len(), 2);
        assert_eq!(AccountFilter::new(StatusFilter::All, "   ").apply(&accounts).len(), 2);
    }

    #[test]
    fn test_status_filter_parsing() {
        assert_eq!("all".parse::<StatusFilter>().unwrap(), StatusFilter::All);
        assert_eq!("".parse::<StatusFilter>().unwrap(), StatusFilter::All);
        assert_eq!(
            "Rejected".parse::<StatusFilter>().unwrap(),
            StatusFilter::Only(AccountStatus::Rejected)
        );
        assert!("archived".parse::<StatusFilter>().is_err());
        assert_eq!(StatusFilter::Only(AccountStatus::Pending).to_string(), "pending");
    }
}
