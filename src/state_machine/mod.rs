// State machine module for the booking lifecycle
//
// Validates requested status changes against the static transition table,
// applies per-target side effects, and writes the append-only audit trail.

pub mod effects;
pub mod errors;
pub mod job_state_machine;
pub mod states;
pub mod transitions;

// Re-export main types for convenient access
pub use errors::{validation_error, LifecycleError, LifecycleResult};
pub use job_state_machine::{JobStateMachine, TransitionOutcome, TransitionRequest};
pub use states::{JobState, ALL_STATES};
pub use transitions::{allowed, is_allowed, ActorRole};
