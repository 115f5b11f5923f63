//! Lifecycle event naming and payloads.

pub mod publisher;

// Re-export key types for convenience
pub use publisher::{EventPublisher, PublishedEvent};

use serde_json::Value;

use crate::constants::events;
use crate::models::Job;
use crate::state_machine::JobState;

/// Event name for a committed transition, keyed by the state entered.
/// `pending` is never a transition target, so it has no event here;
/// creation announces itself as [`events::JOB_REQUESTED`].
pub fn lifecycle_event_name(to_state: JobState) -> Option<&'static str> {
    match to_state {
        JobState::Pending => None,
        JobState::Reviewing => Some(events::JOB_REVIEW_STARTED),
        JobState::Quoted => Some(events::JOB_QUOTED),
        JobState::Accepted => Some(events::JOB_ACCEPTED),
        JobState::Rejected => Some(events::JOB_REJECTED),
        JobState::Confirmed => Some(events::JOB_CONFIRMED),
        JobState::InProgress => Some(events::JOB_STARTED),
        JobState::Completed => Some(events::JOB_COMPLETED),
        JobState::Delivered => Some(events::JOB_DELIVERED),
        JobState::Disputed => Some(events::JOB_DISPUTED),
        JobState::Cancelled => Some(events::JOB_CANCELLED),
        JobState::Closed => Some(events::JOB_CLOSED),
    }
}

/// Context payload shipped with every lifecycle event
pub fn build_job_event_context(job: &Job, from_state: JobState) -> Value {
    serde_json::json!({
        "job_id": job.job_id,
        "customer_id": job.customer_id,
        "vendor_id": job.vendor_id,
        "service_ref": job.service_ref,
        "from_state": from_state,
        "to_state": job.status,
        "transitioned_at": chrono::Utc::now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_name_determination() {
        assert_eq!(
            lifecycle_event_name(JobState::InProgress),
            Some("job.started")
        );
        assert_eq!(
            lifecycle_event_name(JobState::Completed),
            Some("job.completed")
        );
        assert_eq!(lifecycle_event_name(JobState::Pending), None);
    }
}
