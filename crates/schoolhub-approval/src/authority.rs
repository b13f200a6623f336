//! Who may decide which registrations
//!
//! Decision rights are a fixed table keyed by role. Administrators decide
//! anything, teachers only faculty-routed registrations, students nothing.
//! The backend remains the final authority; this table only keeps the
//! client from issuing requests it already knows will be refused.

use schoolhub_core::{ApprovalAuthority, Error, Result, Role, Session, UserAccount};

/// Decision rights of a single role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capability {
    /// Role the entry applies to
    pub role: Role,
    /// Whether the role may open the approval screens at all
    pub reviewer: bool,
    /// Approval authorities whose registrations the role may decide
    pub authorities: &'static [ApprovalAuthority],
}

/// Role → decision rights
pub const CAPABILITIES: [Capability; 3] = [
    Capability {
        role: Role::Student,
        reviewer: false,
        authorities: &[],
    },
    Capability {
        role: Role::Teacher,
        reviewer: true,
        authorities: &[ApprovalAuthority::Faculty],
    },
    Capability {
        role: Role::Admin,
        reviewer: true,
        authorities: &[ApprovalAuthority::RegistrationBlock, ApprovalAuthority::Faculty],
    },
];

/// Look up the capability entry for a role
#[must_use]
pub fn capability(role: Role) -> Capability {
    CAPABILITIES
        .iter()
        .copied()
        .find(|c| c.role == role)
        .unwrap_or(Capability {
            role,
            reviewer: false,
            authorities: &[],
        })
}

/// Whether `role` may decide registrations routed to `authority`
#[must_use]
pub fn can_decide(role: Role, authority: ApprovalAuthority) -> bool {
    capability(role).authorities.contains(&authority)
}

/// Require that the actor may use the approval screens
///
/// # Errors
///
/// Returns [`Error::NotAuthorized`] for roles without reviewer rights.
pub fn ensure_reviewer(actor: &Session) -> Result<()> {
    if capability(actor.role).reviewer {
        Ok(())
    } else {
        Err(Error::NotAuthorized(format!(
            "role '{}' may not review registrations",
            actor.role
        )))
    }
}

/// Require that the actor may decide this particular account
///
/// # Errors
///
/// Returns [`Error::NotAuthorized`] when the actor's role does not cover the
/// account's approval authority.
pub fn ensure_can_decide(actor: &Session, account: &UserAccount) -> Result<()> {
    ensure_reviewer(actor)?;
    if can_decide(actor.role, account.approval_authority) {
        Ok(())
    } else {
        Err(Error::NotAuthorized(format!(
            "role '{}' may not decide {} registrations",
            actor.role, account.approval_authority
        )))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::missing_panics_doc)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rstest::rstest;

    fn account(authority: ApprovalAuthority) -> UserAccount {
        UserAccount::pending("u1", "Anna", "anna@school.test", Role::Student, authority, Utc::now())
    }

    #[rstest]
    #[case(Role::Admin, ApprovalAuthority::RegistrationBlock, true)]
    #[case(Role::Admin, ApprovalAuthority::Faculty, true)]
    #[case(Role::Teacher, ApprovalAuthority::Faculty, true)]
    #[case(Role::Teacher, ApprovalAuthority::RegistrationBlock, false)]
    #[case(Role::Student, ApprovalAuthority::Faculty, false)]
    #[case(Role::Student, ApprovalAuthority::RegistrationBlock, false)]
    fn test_capability_table(
        #[case] role: Role,
        #[case] authority: ApprovalAuthority,
        #[case] allowed: bool,
    ) {
        assert_eq!(can_decide(role, authority), allowed);
        let actor = Session::new("actor", role, "t");
        assert_eq!(ensure_can_decide(&actor, &account(authority)).is_ok(), allowed);
    }

    #[test]
    fn test_every_role_has_an_entry() {
        for role in Role::ALL {
            assert_eq!(capability(role).role, role);
        }
    }

    #[test]
    fn test_student_is_not_a_reviewer() {
        let err = ensure_reviewer(&Session::new("s1", Role::Student, "t")).unwrap_err();
        assert_eq!(err.code(), "NOT_AUTHORIZED");
        assert!(ensure_reviewer(&Session::new("t1", Role::Teacher, "t")).is_ok());
    }
}
