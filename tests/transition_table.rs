//! Exhaustive checks of the transition table against the product rules.

use proptest::prelude::*;

use servly_core::state_machine::JobState as S;
use servly_core::state_machine::{allowed, is_allowed, ActorRole, JobState, ALL_STATES};

/// The full permission matrix: (state, vendor targets, customer targets).
/// Kept literal so a table change has to be made twice to pass.
const EXPECTED: [(JobState, &[JobState], &[JobState]); 12] = [
    (
        S::Pending,
        &[S::Reviewing, S::Accepted, S::Rejected],
        &[S::Cancelled],
    ),
    (
        S::Reviewing,
        &[S::Quoted, S::Accepted, S::Rejected],
        &[S::Cancelled],
    ),
    (
        S::Quoted,
        &[S::Accepted, S::Rejected],
        &[S::Confirmed, S::Cancelled],
    ),
    (S::Accepted, &[], &[S::Confirmed, S::Cancelled]),
    (S::Rejected, &[], &[]),
    (S::Confirmed, &[S::InProgress], &[S::Cancelled]),
    (S::InProgress, &[S::Completed], &[]),
    (S::Completed, &[], &[S::Delivered, S::Disputed]),
    (S::Delivered, &[], &[S::Closed]),
    (S::Cancelled, &[], &[]),
    (S::Disputed, &[S::Closed], &[S::Closed]),
    (S::Closed, &[], &[]),
];

#[test]
fn allowed_matches_permission_matrix_exhaustively() {
    assert_eq!(EXPECTED.len(), ALL_STATES.len());
    for (state, vendor_targets, customer_targets) in EXPECTED {
        assert_eq!(
            allowed(state, ActorRole::Vendor),
            vendor_targets,
            "vendor targets from {state}"
        );
        assert_eq!(
            allowed(state, ActorRole::Customer),
            customer_targets,
            "customer targets from {state}"
        );
    }
}

#[test]
fn every_non_terminal_state_has_an_exit() {
    for state in ALL_STATES {
        let exits = allowed(state, ActorRole::Vendor).len() + allowed(state, ActorRole::Customer).len();
        if state.is_terminal() {
            assert_eq!(exits, 0, "{state} is terminal but has exits");
        } else {
            assert!(exits > 0, "{state} is a dead end but not terminal");
        }
    }
}

fn any_state() -> impl Strategy<Value = JobState> {
    prop::sample::select(ALL_STATES.to_vec())
}

fn any_role() -> impl Strategy<Value = ActorRole> {
    prop::sample::select(vec![ActorRole::Customer, ActorRole::Vendor])
}

proptest! {
    /// No grant ever leaves a terminal state or re-enters `pending`.
    #[test]
    fn grants_respect_structural_rules(
        state in any_state(),
        role in any_role(),
        target in any_state(),
    ) {
        if is_allowed(state, role, target) {
            prop_assert!(!state.is_terminal());
            prop_assert!(target != S::Pending);
            prop_assert!(target != state);
        }
    }

    /// A permission held by one role from a given state is never also held
    /// by the other role, except for closing a dispute.
    #[test]
    fn roles_do_not_share_grants(state in any_state(), target in any_state()) {
        let both = is_allowed(state, ActorRole::Vendor, target)
            && is_allowed(state, ActorRole::Customer, target);
        if both {
            prop_assert_eq!(state, S::Disputed);
            prop_assert_eq!(target, S::Closed);
        }
    }
}
