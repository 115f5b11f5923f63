//! # Job Model
//!
//! A `Job` is a single booking between one customer and one vendor for one
//! catalog offering. The status field is only ever changed through the state
//! machine; messages, attachments and history are append-only; view flags
//! are the one piece of state either party may touch directly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::Offering;
use crate::state_machine::{ActorRole, JobState};

/// How the engagement is priced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricingModel {
    Fixed,
    Hourly,
    Package,
    Custom,
}

/// Pricing terms, set at creation and refined during quoting.
/// Amounts are integer minor units to avoid float drift.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pricing {
    pub model: PricingModel,
    pub amount_cents: i64,
    pub currency: String,
}

/// Estimated and actual effort, in whole hours
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationEstimate {
    pub estimated_hours: Option<i64>,
    pub actual_hours: Option<i64>,
}

/// Scheduling fields, populated incrementally by transition side effects
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scheduling {
    pub preferred_date: Option<DateTime<Utc>>,
    pub confirmed_date: Option<DateTime<Utc>>,
    pub estimated_end: Option<DateTime<Utc>>,
    pub duration: DurationEstimate,
}

/// A deliverable snapshot taken when the customer accepts delivery
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletedDeliverable {
    pub name: String,
    pub description: String,
    pub completed_at: DateTime<Utc>,
}

/// File reference attached to the job. Append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    pub name: String,
    pub locator: String,
    pub uploaded_by: Uuid,
    pub uploaded_at: DateTime<Utc>,
}

/// Kind of activity-log entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    /// Free-text message posted by a party
    Message,
    /// Party-visible status notification
    StatusUpdate,
    /// Entry written by the state machine itself
    System,
}

/// Activity-log entry. Append-only, never reordered or deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub sender_id: Uuid,
    pub body: String,
    pub kind: MessageKind,
    pub sent_at: DateTime<Utc>,
}

/// Audit-trail entry, one per accepted transition (creation is not recorded)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusHistoryEntry {
    pub status: JobState,
    pub changed_at: DateTime<Utc>,
    pub changed_by: Uuid,
    pub reason: Option<String>,
}

/// Cancellation record, set exactly once via the `cancelled` transition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cancellation {
    pub cancelled_by: Uuid,
    pub reason: String,
    pub cancelled_at: DateTime<Utc>,
}

/// Booking-request payload consumed by the creation flow
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewJobRequest {
    pub customer_id: Uuid,
    pub offering_id: Uuid,
    pub requirements: Vec<String>,
    pub preferred_date: Option<DateTime<Utc>>,
    /// Optional opening message from the customer
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub job_id: Uuid,
    pub customer_id: Uuid,
    pub vendor_id: Uuid,
    pub service_ref: Uuid,
    pub status: JobState,
    pub pricing: Pricing,
    pub scheduling: Scheduling,
    pub requirements: Vec<String>,
    pub deliverables: Vec<String>,
    pub completed_deliverables: Vec<CompletedDeliverable>,
    pub attachments: Vec<Attachment>,
    pub messages: Vec<Message>,
    pub status_history: Vec<StatusHistoryEntry>,
    pub cancellation: Option<Cancellation>,
    pub viewed_by_customer: bool,
    pub viewed_by_vendor: bool,
    pub last_viewed_by_customer: Option<DateTime<Utc>>,
    pub last_viewed_by_vendor: Option<DateTime<Utc>>,
    /// Optimistic-concurrency token maintained by the repository
    pub version: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Job {
    /// Build a `pending` job from a booking request and the offering it
    /// references. The vendor and pricing terms come from the offering;
    /// an opening message, if present, lands in the activity log.
    /// Creation does not write a status-history entry.
    pub fn from_request(request: NewJobRequest, offering: &Offering) -> Self {
        let now = Utc::now();
        let mut job = Self {
            job_id: Uuid::new_v4(),
            customer_id: request.customer_id,
            vendor_id: offering.vendor_id,
            service_ref: offering.offering_id,
            status: JobState::default(),
            pricing: offering.pricing.clone(),
            scheduling: Scheduling {
                preferred_date: request.preferred_date,
                ..Scheduling::default()
            },
            requirements: request.requirements,
            deliverables: Vec::new(),
            completed_deliverables: Vec::new(),
            attachments: Vec::new(),
            messages: Vec::new(),
            status_history: Vec::new(),
            cancellation: None,
            viewed_by_customer: false,
            viewed_by_vendor: false,
            last_viewed_by_customer: None,
            last_viewed_by_vendor: None,
            version: 0,
            created_at: now,
            updated_at: now,
        };

        if let Some(body) = request.message {
            job.append_message(request.customer_id, body, MessageKind::Message, now);
        }

        job
    }

    /// Resolve which party the given actor is, if any.
    ///
    /// An account that is both parties of its own job resolves to `None`;
    /// self-bookings are not a supported flow.
    pub fn party_role(&self, actor_id: Uuid) -> Option<ActorRole> {
        if self.customer_id == self.vendor_id {
            return None;
        }
        if actor_id == self.customer_id {
            Some(ActorRole::Customer)
        } else if actor_id == self.vendor_id {
            Some(ActorRole::Vendor)
        } else {
            None
        }
    }

    /// Append an activity-log entry. Shared by direct messaging and the
    /// state machine's system entries; append order is the total order.
    pub fn append_message(
        &mut self,
        sender_id: Uuid,
        body: impl Into<String>,
        kind: MessageKind,
        now: DateTime<Utc>,
    ) -> Message {
        let message = Message {
            sender_id,
            body: body.into(),
            kind,
            sent_at: now,
        };
        self.messages.push(message.clone());
        message
    }

    /// Append the audit-trail entry for an accepted transition
    pub fn record_transition(
        &mut self,
        status: JobState,
        changed_by: Uuid,
        reason: Option<String>,
        now: DateTime<Utc>,
    ) {
        self.status_history.push(StatusHistoryEntry {
            status,
            changed_at: now,
            changed_by,
            reason,
        });
    }

    /// Append a file reference
    pub fn add_attachment(
        &mut self,
        name: impl Into<String>,
        locator: impl Into<String>,
        uploaded_by: Uuid,
        now: DateTime<Utc>,
    ) -> Attachment {
        let attachment = Attachment {
            name: name.into(),
            locator: locator.into(),
            uploaded_by,
            uploaded_at: now,
        };
        self.attachments.push(attachment.clone());
        attachment
    }

    /// Stamp the viewing party's flag. Idempotent.
    pub fn mark_viewed_by(&mut self, role: ActorRole, now: DateTime<Utc>) {
        match role {
            ActorRole::Customer => {
                self.viewed_by_customer = true;
                self.last_viewed_by_customer = Some(now);
            }
            ActorRole::Vendor => {
                self.viewed_by_vendor = true;
                self.last_viewed_by_vendor = Some(now);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_offering(vendor_id: Uuid) -> Offering {
        Offering {
            offering_id: Uuid::new_v4(),
            vendor_id,
            title: "Deep clean, two bedrooms".to_string(),
            pricing: Pricing {
                model: PricingModel::Fixed,
                amount_cents: 12_000,
                currency: "USD".to_string(),
            },
            active: true,
        }
    }

    #[test]
    fn test_from_request_builds_pending_job() {
        let customer_id = Uuid::new_v4();
        let offering = sample_offering(Uuid::new_v4());

        let job = Job::from_request(
            NewJobRequest {
                customer_id,
                offering_id: offering.offering_id,
                requirements: vec!["bring supplies".to_string()],
                preferred_date: None,
                message: Some("Can you come Friday?".to_string()),
            },
            &offering,
        );

        assert_eq!(job.status, JobState::Pending);
        assert_eq!(job.customer_id, customer_id);
        assert_eq!(job.vendor_id, offering.vendor_id);
        assert_eq!(job.service_ref, offering.offering_id);
        assert_eq!(job.pricing.amount_cents, 12_000);
        assert_eq!(job.version, 0);
        // Creation is not a transition
        assert!(job.status_history.is_empty());
        // The opening message landed in the log
        assert_eq!(job.messages.len(), 1);
        assert_eq!(job.messages[0].kind, MessageKind::Message);
        assert_eq!(job.messages[0].sender_id, customer_id);
    }

    #[test]
    fn test_party_role_resolution() {
        let offering = sample_offering(Uuid::new_v4());
        let customer_id = Uuid::new_v4();
        let job = Job::from_request(
            NewJobRequest {
                customer_id,
                offering_id: offering.offering_id,
                requirements: vec![],
                preferred_date: None,
                message: None,
            },
            &offering,
        );

        assert_eq!(job.party_role(customer_id), Some(ActorRole::Customer));
        assert_eq!(job.party_role(job.vendor_id), Some(ActorRole::Vendor));
        assert_eq!(job.party_role(Uuid::new_v4()), None);
    }

    #[test]
    fn test_self_booking_resolves_to_no_role() {
        let account = Uuid::new_v4();
        let offering = sample_offering(account);
        let job = Job::from_request(
            NewJobRequest {
                customer_id: account,
                offering_id: offering.offering_id,
                requirements: vec![],
                preferred_date: None,
                message: None,
            },
            &offering,
        );

        assert_eq!(job.party_role(account), None);
    }

    #[test]
    fn test_mark_viewed_is_idempotent() {
        let offering = sample_offering(Uuid::new_v4());
        let mut job = Job::from_request(
            NewJobRequest {
                customer_id: Uuid::new_v4(),
                offering_id: offering.offering_id,
                requirements: vec![],
                preferred_date: None,
                message: None,
            },
            &offering,
        );

        let first = Utc::now();
        job.mark_viewed_by(ActorRole::Vendor, first);
        assert!(job.viewed_by_vendor);
        assert_eq!(job.last_viewed_by_vendor, Some(first));
        assert!(!job.viewed_by_customer);

        let second = Utc::now();
        job.mark_viewed_by(ActorRole::Vendor, second);
        assert!(job.viewed_by_vendor);
        assert_eq!(job.last_viewed_by_vendor, Some(second));
    }

    #[test]
    fn test_job_serde_round_trip() {
        let offering = sample_offering(Uuid::new_v4());
        let mut job = Job::from_request(
            NewJobRequest {
                customer_id: Uuid::new_v4(),
                offering_id: offering.offering_id,
                requirements: vec!["keys under mat".to_string()],
                preferred_date: Some(Utc::now()),
                message: None,
            },
            &offering,
        );
        job.append_message(job.customer_id, "hello", MessageKind::Message, Utc::now());

        let json = serde_json::to_value(&job).unwrap();
        let parsed: Job = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, job);
    }
}
