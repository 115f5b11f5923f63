//! Static transition table for the booking lifecycle.
//!
//! `allowed` is a total function over (status, role). The table is fixed at
//! compile time; there is no runtime registration or mutation.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::states::JobState;

/// Resolved role of a caller with respect to one specific job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorRole {
    Customer,
    Vendor,
}

impl fmt::Display for ActorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Customer => write!(f, "customer"),
            Self::Vendor => write!(f, "vendor"),
        }
    }
}

use super::states::JobState as S;

const NONE: &[JobState] = &[];

/// Statuses the given role may move a job to from the given status.
///
/// `rejected`, `cancelled` and `closed` have no outgoing edges for either
/// role; a transition requested from one of them is refused like any other
/// absence from the table.
pub fn allowed(status: JobState, role: ActorRole) -> &'static [JobState] {
    match (status, role) {
        (S::Pending, ActorRole::Vendor) => &[S::Reviewing, S::Accepted, S::Rejected],
        (S::Pending, ActorRole::Customer) => &[S::Cancelled],

        (S::Reviewing, ActorRole::Vendor) => &[S::Quoted, S::Accepted, S::Rejected],
        (S::Reviewing, ActorRole::Customer) => &[S::Cancelled],

        (S::Quoted, ActorRole::Vendor) => &[S::Accepted, S::Rejected],
        (S::Quoted, ActorRole::Customer) => &[S::Confirmed, S::Cancelled],

        (S::Accepted, ActorRole::Vendor) => NONE,
        (S::Accepted, ActorRole::Customer) => &[S::Confirmed, S::Cancelled],

        (S::Confirmed, ActorRole::Vendor) => &[S::InProgress],
        (S::Confirmed, ActorRole::Customer) => &[S::Cancelled],

        (S::InProgress, ActorRole::Vendor) => &[S::Completed],
        (S::InProgress, ActorRole::Customer) => NONE,

        (S::Completed, ActorRole::Vendor) => NONE,
        (S::Completed, ActorRole::Customer) => &[S::Delivered, S::Disputed],

        (S::Delivered, ActorRole::Vendor) => NONE,
        (S::Delivered, ActorRole::Customer) => &[S::Closed],

        (S::Disputed, ActorRole::Vendor) => &[S::Closed],
        (S::Disputed, ActorRole::Customer) => &[S::Closed],

        (S::Rejected, _) | (S::Cancelled, _) | (S::Closed, _) => NONE,
    }
}

/// Check whether `role` may move a job from `status` to `target`.
pub fn is_allowed(status: JobState, role: ActorRole, target: JobState) -> bool {
    allowed(status, role).contains(&target)
}
