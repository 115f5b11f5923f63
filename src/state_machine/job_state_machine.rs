//! The transition engine for the booking lifecycle.
//!
//! Every call is load, validate against the transition table, apply side
//! effects to a working copy, append audit entries, then a compare-and-swap
//! save. A lost race surfaces as `Conflict` with nothing applied; the caller
//! decides whether re-reading and re-submitting is still what the actor
//! wants.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::effects;
use super::errors::{LifecycleError, LifecycleResult};
use super::states::JobState;
use super::transitions;
use crate::actors::ActorResolver;
use crate::events::{build_job_event_context, lifecycle_event_name, EventPublisher};
use crate::models::{Job, MessageKind};
use crate::repository::JobRepository;

/// Transition-specific optional payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransitionRequest {
    /// Free-text reason, recorded in the audit trail and embedded verbatim
    /// in the system message
    pub reason: Option<String>,
    /// RFC 3339 timestamp; consumed when entering `in_progress`
    pub estimated_completion_date: Option<String>,
    /// Consumed when entering `completed` (extra deliverable) and
    /// `delivered` (snapshot description)
    pub delivery_notes: Option<String>,
}

impl TransitionRequest {
    pub fn with_reason(reason: impl Into<String>) -> Self {
        Self {
            reason: Some(reason.into()),
            ..Self::default()
        }
    }
}

/// Result of an accepted transition
#[derive(Debug, Clone)]
pub struct TransitionOutcome {
    pub job: Job,
    pub previous_status: JobState,
}

/// Stateless transition engine over the repository and resolver boundaries
pub struct JobStateMachine {
    repository: Arc<dyn JobRepository>,
    resolver: Arc<dyn ActorResolver>,
    event_publisher: EventPublisher,
}

impl JobStateMachine {
    pub fn new(
        repository: Arc<dyn JobRepository>,
        resolver: Arc<dyn ActorResolver>,
        event_publisher: EventPublisher,
    ) -> Self {
        Self {
            repository,
            resolver,
            event_publisher,
        }
    }

    /// Load the job and attempt the requested transition.
    pub async fn request_transition(
        &self,
        job_id: Uuid,
        requested: JobState,
        actor_id: Uuid,
        request: TransitionRequest,
    ) -> LifecycleResult<TransitionOutcome> {
        let job = self
            .repository
            .load(job_id)
            .await?
            .ok_or(LifecycleError::NotFound { job_id })?;
        self.apply_transition(job, requested, actor_id, request)
            .await
    }

    /// Attempt the transition against an already-loaded job snapshot.
    ///
    /// The snapshot's version is the compare-and-swap token: if another
    /// writer committed since the snapshot was taken, the save fails with
    /// `Conflict` and the stored job is untouched. Callers retrying after a
    /// conflict re-load and come back through here so the transition table
    /// is re-checked against the fresh status.
    pub async fn apply_transition(
        &self,
        job: Job,
        requested: JobState,
        actor_id: Uuid,
        request: TransitionRequest,
    ) -> LifecycleResult<TransitionOutcome> {
        // Party check comes first; a stranger learns nothing about the job,
        // not even that its status makes the request invalid.
        let role = match self.resolver.resolve_role(&job, actor_id).await {
            Some(role) => role,
            None => {
                tracing::warn!(
                    job_id = %job.job_id,
                    actor_id = %actor_id,
                    "Transition refused: actor is not a party to the job"
                );
                return Err(LifecycleError::Forbidden {
                    job_id: job.job_id,
                    actor_id,
                });
            }
        };

        if !transitions::is_allowed(job.status, role, requested) {
            tracing::warn!(
                job_id = %job.job_id,
                current = %job.status,
                requested = %requested,
                role = %role,
                "Transition refused: not permitted by the transition table"
            );
            return Err(LifecycleError::InvalidTransition {
                current: job.status,
                requested,
                role,
            });
        }

        let previous = job.status;
        let now = Utc::now();
        let mut updated = job;

        effects::apply(&mut updated, requested, actor_id, &request, now)?;

        updated.status = requested;
        updated.record_transition(requested, actor_id, request.reason.clone(), now);
        updated.append_message(
            actor_id,
            change_summary(previous, requested, request.reason.as_deref()),
            MessageKind::System,
            now,
        );
        updated.updated_at = now;

        let expected_version = updated.version;
        let saved = self.repository.save(updated, expected_version).await?;

        // Post-commit notification is fire-and-forget; a missed event can
        // never undo a committed transition.
        if let Some(event_name) = lifecycle_event_name(saved.status) {
            let reached = self
                .event_publisher
                .publish(event_name, build_job_event_context(&saved, previous));
            tracing::trace!(event_name, subscribers = reached, "Lifecycle event published");
        }

        tracing::info!(
            job_id = %saved.job_id,
            from = %previous,
            to = %saved.status,
            role = %role,
            "Job transition accepted"
        );

        Ok(TransitionOutcome {
            job: saved,
            previous_status: previous,
        })
    }
}

/// System-message body for an accepted transition, embedding the actor's
/// reason verbatim when one was supplied.
fn change_summary(from: JobState, to: JobState, reason: Option<&str>) -> String {
    match reason {
        Some(reason) => format!("Status changed from {from} to {to}: {reason}"),
        None => format!("Status changed from {from} to {to}"),
    }
}
