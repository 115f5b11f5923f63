//! Per-target side effects applied when a job enters a new status.
//!
//! Effects mutate auxiliary fields on a working copy of the job; the status
//! field itself and the audit entries are written by the state machine. The
//! match over the target state is exhaustive, so adding a status without
//! deciding its effects is a compile error.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::errors::{validation_error, LifecycleResult};
use super::job_state_machine::TransitionRequest;
use super::states::JobState;
use crate::constants::{DEFAULT_CANCELLATION_REASON, DEFAULT_DELIVERY_DESCRIPTION};
use crate::models::{Cancellation, CompletedDeliverable, Job};

const SECONDS_PER_HOUR: i64 = 3_600;

/// Apply the side effects of entering `target` to the working copy.
///
/// A validation failure leaves the caller's stored job untouched because
/// only the working copy was mutated.
pub(crate) fn apply(
    job: &mut Job,
    target: JobState,
    actor_id: Uuid,
    request: &TransitionRequest,
    now: DateTime<Utc>,
) -> LifecycleResult<()> {
    match target {
        JobState::InProgress => {
            job.scheduling.confirmed_date = Some(now);
            if let Some(raw) = &request.estimated_completion_date {
                let parsed = DateTime::parse_from_rfc3339(raw).map_err(|e| {
                    validation_error(format!(
                        "estimated completion date {raw:?} is not RFC 3339: {e}"
                    ))
                })?;
                job.scheduling.estimated_end = Some(parsed.with_timezone(&Utc));
            }
        }

        JobState::Completed => {
            if job.scheduling.duration.actual_hours.is_none() {
                if let Some(confirmed) = job.scheduling.confirmed_date {
                    job.scheduling.duration.actual_hours = Some(elapsed_whole_hours(confirmed, now));
                }
            }
            if let Some(notes) = &request.delivery_notes {
                job.deliverables.push(notes.clone());
            }
        }

        JobState::Delivered => {
            // Snapshot every current deliverable. No dedup against an earlier
            // snapshot: the transition table makes re-entering this state
            // unreachable, and guarding here would be undocumented behavior.
            let description = request
                .delivery_notes
                .clone()
                .unwrap_or_else(|| DEFAULT_DELIVERY_DESCRIPTION.to_string());
            let snapshots: Vec<CompletedDeliverable> = job
                .deliverables
                .iter()
                .map(|name| CompletedDeliverable {
                    name: name.clone(),
                    description: description.clone(),
                    completed_at: now,
                })
                .collect();
            job.completed_deliverables.extend(snapshots);
        }

        JobState::Cancelled => {
            job.cancellation = Some(Cancellation {
                cancelled_by: actor_id,
                reason: request
                    .reason
                    .clone()
                    .unwrap_or_else(|| DEFAULT_CANCELLATION_REASON.to_string()),
                cancelled_at: now,
            });
        }

        // No auxiliary effects beyond the common audit steps
        JobState::Pending
        | JobState::Reviewing
        | JobState::Quoted
        | JobState::Accepted
        | JobState::Rejected
        | JobState::Confirmed
        | JobState::Disputed
        | JobState::Closed => {}
    }

    Ok(())
}

/// Ceiling of the elapsed time in whole hours, floored at zero so clock skew
/// cannot yield a negative duration.
fn elapsed_whole_hours(start: DateTime<Utc>, end: DateTime<Utc>) -> i64 {
    let seconds = (end - start).num_seconds().max(0);
    (seconds + SECONDS_PER_HOUR - 1) / SECONDS_PER_HOUR
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Offering;
    use crate::models::{NewJobRequest, Pricing, PricingModel};
    use chrono::Duration;

    fn sample_job() -> Job {
        let offering = Offering {
            offering_id: Uuid::new_v4(),
            vendor_id: Uuid::new_v4(),
            title: "Furniture assembly".to_string(),
            pricing: Pricing {
                model: PricingModel::Fixed,
                amount_cents: 6_500,
                currency: "USD".to_string(),
            },
            active: true,
        };
        Job::from_request(
            NewJobRequest {
                customer_id: Uuid::new_v4(),
                offering_id: offering.offering_id,
                requirements: vec![],
                preferred_date: None,
                message: None,
            },
            &offering,
        )
    }

    #[test]
    fn test_in_progress_stamps_confirmed_date() {
        let mut job = sample_job();
        let vendor = job.vendor_id;
        let now = Utc::now();

        apply(
            &mut job,
            JobState::InProgress,
            vendor,
            &TransitionRequest::default(),
            now,
        )
        .unwrap();

        assert_eq!(job.scheduling.confirmed_date, Some(now));
        assert_eq!(job.scheduling.estimated_end, None);
    }

    #[test]
    fn test_in_progress_parses_estimated_completion() {
        let mut job = sample_job();
        let vendor = job.vendor_id;
        let request = TransitionRequest {
            estimated_completion_date: Some("2026-08-10T14:00:00Z".to_string()),
            ..TransitionRequest::default()
        };

        apply(&mut job, JobState::InProgress, vendor, &request, Utc::now()).unwrap();
        assert!(job.scheduling.estimated_end.is_some());
    }

    #[test]
    fn test_in_progress_rejects_malformed_estimate() {
        let mut job = sample_job();
        let vendor = job.vendor_id;
        let request = TransitionRequest {
            estimated_completion_date: Some("next tuesday".to_string()),
            ..TransitionRequest::default()
        };

        let result = apply(&mut job, JobState::InProgress, vendor, &request, Utc::now());
        assert!(result.is_err());
        // The working copy past the failure point is discarded by the caller;
        // here we only assert no estimate was recorded.
        assert_eq!(job.scheduling.estimated_end, None);
    }

    #[test]
    fn test_completed_computes_ceiling_duration() {
        let mut job = sample_job();
        let vendor = job.vendor_id;
        let now = Utc::now();
        job.scheduling.confirmed_date = Some(now - Duration::minutes(90));

        apply(
            &mut job,
            JobState::Completed,
            vendor,
            &TransitionRequest::default(),
            now,
        )
        .unwrap();

        // 90 minutes rounds up to 2 whole hours
        assert_eq!(job.scheduling.duration.actual_hours, Some(2));
    }

    #[test]
    fn test_completed_keeps_existing_duration() {
        let mut job = sample_job();
        let vendor = job.vendor_id;
        let now = Utc::now();
        job.scheduling.confirmed_date = Some(now - Duration::hours(5));
        job.scheduling.duration.actual_hours = Some(3);

        apply(
            &mut job,
            JobState::Completed,
            vendor,
            &TransitionRequest::default(),
            now,
        )
        .unwrap();

        assert_eq!(job.scheduling.duration.actual_hours, Some(3));
    }

    #[test]
    fn test_completed_appends_delivery_notes() {
        let mut job = sample_job();
        job.deliverables.push("assembled desk".to_string());
        let vendor = job.vendor_id;
        let request = TransitionRequest {
            delivery_notes: Some("photos of finished assembly".to_string()),
            ..TransitionRequest::default()
        };

        apply(&mut job, JobState::Completed, vendor, &request, Utc::now()).unwrap();
        assert_eq!(
            job.deliverables,
            vec![
                "assembled desk".to_string(),
                "photos of finished assembly".to_string()
            ]
        );
    }

    #[test]
    fn test_delivered_snapshots_deliverables() {
        let mut job = sample_job();
        job.deliverables = vec!["desk".to_string(), "shelf".to_string()];
        let customer = job.customer_id;
        let now = Utc::now();

        apply(
            &mut job,
            JobState::Delivered,
            customer,
            &TransitionRequest::default(),
            now,
        )
        .unwrap();

        assert_eq!(job.completed_deliverables.len(), 2);
        assert_eq!(job.completed_deliverables[0].name, "desk");
        assert_eq!(job.completed_deliverables[0].description, "Delivered");
        assert_eq!(job.completed_deliverables[0].completed_at, now);
    }

    #[test]
    fn test_delivered_uses_notes_as_description() {
        let mut job = sample_job();
        job.deliverables = vec!["desk".to_string()];
        let customer = job.customer_id;
        let request = TransitionRequest {
            delivery_notes: Some("left with concierge".to_string()),
            ..TransitionRequest::default()
        };

        apply(&mut job, JobState::Delivered, customer, &request, Utc::now()).unwrap();
        assert_eq!(
            job.completed_deliverables[0].description,
            "left with concierge"
        );
    }

    #[test]
    fn test_cancelled_records_supplied_reason() {
        let mut job = sample_job();
        let actor = job.customer_id;
        let request = TransitionRequest::with_reason("found someone closer");

        apply(&mut job, JobState::Cancelled, actor, &request, Utc::now()).unwrap();

        let cancellation = job.cancellation.unwrap();
        assert_eq!(cancellation.cancelled_by, actor);
        assert_eq!(cancellation.reason, "found someone closer");
    }

    #[test]
    fn test_cancelled_defaults_reason() {
        let mut job = sample_job();
        let actor = job.customer_id;

        apply(
            &mut job,
            JobState::Cancelled,
            actor,
            &TransitionRequest::default(),
            Utc::now(),
        )
        .unwrap();

        assert_eq!(job.cancellation.unwrap().reason, "No reason provided");
    }

    #[test]
    fn test_plain_targets_have_no_effect() {
        let baseline = sample_job();
        for target in [
            JobState::Reviewing,
            JobState::Quoted,
            JobState::Accepted,
            JobState::Rejected,
            JobState::Confirmed,
            JobState::Disputed,
            JobState::Closed,
        ] {
            let mut job = baseline.clone();
            let vendor = job.vendor_id;
            apply(
                &mut job,
                target,
                vendor,
                &TransitionRequest::default(),
                Utc::now(),
            )
            .unwrap();
            assert_eq!(job, baseline, "entering {target} must not touch fields");
        }
    }

    #[test]
    fn test_elapsed_whole_hours() {
        let start = Utc::now();
        assert_eq!(elapsed_whole_hours(start, start), 0);
        assert_eq!(elapsed_whole_hours(start, start + Duration::seconds(1)), 1);
        assert_eq!(elapsed_whole_hours(start, start + Duration::hours(3)), 3);
        assert_eq!(
            elapsed_whole_hours(start, start + Duration::hours(3) + Duration::seconds(1)),
            4
        );
        // Clock skew floors at zero
        assert_eq!(elapsed_whole_hours(start, start - Duration::hours(1)), 0);
    }
}
