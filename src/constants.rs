//! System constants shared across the booking lifecycle core.

// Re-export state types for convenience
pub use crate::state_machine::{ActorRole, JobState as JobStatus};

/// Lifecycle events emitted on the broadcast channel after a committed
/// transition. The catalog/analytics subsystem subscribes to
/// [`events::JOB_COMPLETED`] to maintain booking counters.
pub mod events {
    pub const JOB_REQUESTED: &str = "job.requested";
    pub const JOB_REVIEW_STARTED: &str = "job.review_started";
    pub const JOB_QUOTED: &str = "job.quoted";
    pub const JOB_ACCEPTED: &str = "job.accepted";
    pub const JOB_REJECTED: &str = "job.rejected";
    pub const JOB_CONFIRMED: &str = "job.confirmed";
    pub const JOB_STARTED: &str = "job.started";
    pub const JOB_COMPLETED: &str = "job.completed";
    pub const JOB_DELIVERED: &str = "job.delivered";
    pub const JOB_DISPUTED: &str = "job.disputed";
    pub const JOB_CANCELLED: &str = "job.cancelled";
    pub const JOB_CLOSED: &str = "job.closed";
}

/// Reason recorded when a cancelling party supplies none.
pub const DEFAULT_CANCELLATION_REASON: &str = "No reason provided";

/// Description stamped on delivered work when no delivery notes are supplied.
pub const DEFAULT_DELIVERY_DESCRIPTION: &str = "Delivered";
