//! Behavioural properties of the approval workflow

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]

use chrono::{Duration, TimeZone, Utc};
use proptest::prelude::*;
use schoolhub_approval::{
    AccountFilter, ApprovalWorkflow, InMemoryBackend, StatusFilter, compute_stats,
};
use schoolhub_core::{AccountStatus, ApprovalAuthority, Error, Role, Session, UserAccount};

fn registrations(count: usize) -> Vec<UserAccount> {
    let t0 = Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap();
    (0..count)
        .map(|i| {
            let authority = if i % 2 == 0 {
                ApprovalAuthority::Faculty
            } else {
                ApprovalAuthority::RegistrationBlock
            };
            let offset = i64::try_from(count - i).unwrap();
            UserAccount::pending(
                format!("user-{i}"),
                format!("User {i}"),
                format!("user{i}@school.test"),
                Role::Student,
                authority,
                t0 + Duration::minutes(offset),
            )
        })
        .collect()
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("test runtime")
}

#[tokio::test]
async fn approved_account_leaves_pending_list() {
    let mut workflow = ApprovalWorkflow::load(InMemoryBackend::new(registrations(4)))
        .await
        .unwrap();
    let admin = Session::new("admin", Role::Admin, "token");

    workflow.approve("user-2", &admin).await.unwrap();

    let pending = workflow.list_pending(None);
    assert_eq!(pending.len(), 3);
    assert!(pending.iter().all(|a| a.id != "user-2"));
}

#[tokio::test]
async fn rejected_then_reapproved_account_leaves_pending_list() {
    let mut workflow = ApprovalWorkflow::load(InMemoryBackend::new(registrations(2)))
        .await
        .unwrap();
    let admin = Session::new("admin", Role::Admin, "token");

    let rejected = workflow.reject("user-1", &admin, "wrong school").await.unwrap();
    assert_eq!(rejected.status, AccountStatus::Rejected);

    let approved = workflow.approve("user-1", &admin).await.unwrap();
    assert_eq!(approved.status, AccountStatus::Approved);
    assert!(workflow.list_pending(None).iter().all(|a| a.id != "user-1"));
}

#[tokio::test]
async fn teacher_is_refused_registration_block_records() {
    let mut workflow = ApprovalWorkflow::load(InMemoryBackend::new(registrations(2)))
        .await
        .unwrap();
    let teacher = Session::new("teacher", Role::Teacher, "token");

    let err = workflow.reject("user-1", &teacher, "not mine").await.unwrap_err();
    assert!(matches!(err, Error::NotAuthorized(_)));
    assert!(workflow.find("user-1").unwrap().is_pending());
}

#[test]
fn stats_over_known_mix() {
    let mut accounts = registrations(6);
    let statuses = [
        AccountStatus::Pending,
        AccountStatus::Pending,
        AccountStatus::Approved,
        AccountStatus::Approved,
        AccountStatus::Approved,
        AccountStatus::Rejected,
    ];
    for (account, status) in accounts.iter_mut().zip(statuses) {
        account.status = status;
    }

    let stats = compute_stats(&accounts);
    assert_eq!(
        (stats.total, stats.pending, stats.approved, stats.rejected),
        (6, 2, 3, 1)
    );
}

#[test]
fn filter_example_from_admin_panel() {
    let t = Utc::now();
    let mut anna_approved = UserAccount::pending(
        "3",
        "Anna",
        "anna2@school.test",
        Role::Student,
        ApprovalAuthority::RegistrationBlock,
        t,
    );
    anna_approved.status = AccountStatus::Approved;
    let accounts = vec![
        UserAccount::pending(
            "1",
            "Anna",
            "anna@school.test",
            Role::Student,
            ApprovalAuthority::RegistrationBlock,
            t,
        ),
        UserAccount::pending(
            "2",
            "Bob",
            "bob@school.test",
            Role::Student,
            ApprovalAuthority::RegistrationBlock,
            t,
        ),
        anna_approved,
    ];

    let filter = AccountFilter::new(StatusFilter::Only(AccountStatus::Pending), "ann");
    let hits: Vec<_> = filter.apply(&accounts).into_iter().map(|a| a.id.clone()).collect();
    assert_eq!(hits, vec!["1".to_string()]);
}

proptest! {
    #[test]
    fn blank_reason_never_mutates(reason in "[ \t\r\n]{0,8}", index in 0usize..4) {
        runtime().block_on(async {
            let backend = InMemoryBackend::new(registrations(4));
            let mut workflow = ApprovalWorkflow::load(backend.clone()).await.unwrap();
            let before = workflow.accounts().to_vec();
            let admin = Session::new("admin", Role::Admin, "token");

            let err = workflow
                .reject(&format!("user-{index}"), &admin, &reason)
                .await
                .unwrap_err();

            prop_assert!(matches!(err, Error::InvalidReason));
            prop_assert_eq!(workflow.accounts(), before.as_slice());
            prop_assert_eq!(backend.all(), before);
            Ok(())
        })?;
    }

    #[test]
    fn equal_timestamps_keep_snapshot_order(minutes in proptest::collection::vec(0i64..3, 0..10)) {
        let t0 = Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap();
        let accounts: Vec<_> = registrations(minutes.len())
            .into_iter()
            .zip(&minutes)
            .map(|(mut account, &m)| {
                account.created_at = t0 + Duration::minutes(m);
                account
            })
            .collect();
        let mut expected: Vec<_> = accounts.iter().map(|a| (a.created_at, a.id.clone())).collect();
        expected.sort_by_key(|(created_at, _)| *created_at);
        let expected: Vec<_> = expected.into_iter().map(|(_, id)| id).collect();

        let workflow = runtime()
            .block_on(ApprovalWorkflow::load(InMemoryBackend::new(accounts)))
            .unwrap();
        let ids: Vec<_> = workflow.list_pending(None).iter().map(|a| a.id.clone()).collect();
        prop_assert_eq!(ids, expected);
    }

    #[test]
    fn pending_list_is_sorted_and_consistent(
        decisions in proptest::collection::vec((0usize..6, any::<bool>()), 0..12)
    ) {
        runtime().block_on(async {
            let mut workflow = ApprovalWorkflow::load(InMemoryBackend::new(registrations(6)))
                .await
                .unwrap();
            let admin = Session::new("admin", Role::Admin, "token");

            for (index, approve) in decisions {
                let id = format!("user-{index}");
                let before = workflow.find(&id).unwrap().status;
                let result = if approve {
                    workflow.approve(&id, &admin).await
                } else {
                    workflow.reject(&id, &admin, "reviewed").await
                };
                let after = workflow.find(&id).unwrap().status;

                match result {
                    Ok(account) => {
                        prop_assert_ne!(before, after);
                        prop_assert_eq!(account.status, after);
                    }
                    Err(Error::InvalidTransition { from, to }) => {
                        prop_assert_eq!(from, before);
                        prop_assert_eq!(to, before);
                        prop_assert_eq!(after, before);
                    }
                    Err(other) => prop_assert!(false, "unexpected error: {}", other),
                }
            }

            let pending = workflow.list_pending(None);
            prop_assert!(pending.iter().all(|a| a.status == AccountStatus::Pending));
            prop_assert!(pending.windows(2).all(|w| w[0].created_at <= w[1].created_at));

            let stats = workflow.stats();
            prop_assert_eq!(stats.pending + stats.approved + stats.rejected, stats.total);
            prop_assert_eq!(stats.pending, pending.len());
            Ok(())
        })?;
    }
}
