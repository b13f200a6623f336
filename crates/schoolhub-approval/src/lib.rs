//! Registration approval workflow for `SchoolHub`
//!
//! A registration starts out `pending` and is decided by an administrator or,
//! for faculty-routed registrations, by a teacher. Decisions can be revised:
//! a rejected registration may later be approved and vice versa. The
//! [`ApprovalWorkflow`] enforces who may decide what, keeps the status
//! transitions legal, and answers the list and statistics queries the admin
//! screens need.

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

pub mod authority;
pub mod backend;
pub mod filter;
pub mod memory;
pub mod stats;
pub mod transition;
pub mod workflow;

pub use authority::{Capability, can_decide};
pub use backend::ApprovalBackend;
pub use filter::{AccountFilter, StatusFilter};
pub use memory::{FailureMode, InMemoryBackend};
pub use stats::compute_stats;
pub use transition::Decision;
pub use workflow::ApprovalWorkflow;
