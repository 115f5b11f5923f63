//! Append-only activity log and view tracking.
//!
//! Messages and attachments share the repository's compare-and-swap save
//! path with the state machine, so an append can observe `Conflict` under a
//! concurrent transition; appends carry no transition invariants, so callers
//! simply retry. Entries are retrievable in strict append order.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::actors::ActorResolver;
use crate::models::{Attachment, Job, Message, MessageKind};
use crate::repository::JobRepository;
use crate::state_machine::{validation_error, LifecycleError, LifecycleResult};

/// Party-gated append operations on a job's activity log
pub struct ActivityLog {
    repository: Arc<dyn JobRepository>,
    resolver: Arc<dyn ActorResolver>,
}

impl ActivityLog {
    pub fn new(repository: Arc<dyn JobRepository>, resolver: Arc<dyn ActorResolver>) -> Self {
        Self {
            repository,
            resolver,
        }
    }

    /// Append a free-text message from one of the job's parties.
    pub async fn post_message(
        &self,
        job_id: Uuid,
        actor_id: Uuid,
        body: &str,
    ) -> LifecycleResult<Message> {
        let job = self.load(job_id).await?;
        self.authorize(&job, actor_id).await?;

        if body.trim().is_empty() {
            return Err(validation_error("message body must not be empty"));
        }

        let now = Utc::now();
        let mut updated = job;
        let message = updated.append_message(actor_id, body, MessageKind::Message, now);
        updated.updated_at = now;

        let expected_version = updated.version;
        self.repository.save(updated, expected_version).await?;

        tracing::debug!(job_id = %job_id, sender_id = %actor_id, "Message appended");
        Ok(message)
    }

    /// Append a file reference from one of the job's parties.
    pub async fn add_attachment(
        &self,
        job_id: Uuid,
        actor_id: Uuid,
        name: &str,
        locator: &str,
    ) -> LifecycleResult<Attachment> {
        let job = self.load(job_id).await?;
        self.authorize(&job, actor_id).await?;

        if name.trim().is_empty() || locator.trim().is_empty() {
            return Err(validation_error("attachment name and locator are required"));
        }

        let now = Utc::now();
        let mut updated = job;
        let attachment = updated.add_attachment(name, locator, actor_id, now);
        updated.updated_at = now;

        let expected_version = updated.version;
        self.repository.save(updated, expected_version).await?;

        tracing::debug!(job_id = %job_id, uploaded_by = %actor_id, "Attachment appended");
        Ok(attachment)
    }

    /// Stamp the caller's viewed flag. Idempotent; independent of status.
    pub async fn mark_viewed(&self, job_id: Uuid, actor_id: Uuid) -> LifecycleResult<Job> {
        let job = self.load(job_id).await?;
        let role = self.authorize(&job, actor_id).await?;

        let now = Utc::now();
        let mut updated = job;
        updated.mark_viewed_by(role, now);

        let expected_version = updated.version;
        let saved = self.repository.save(updated, expected_version).await?;
        Ok(saved)
    }

    async fn load(&self, job_id: Uuid) -> LifecycleResult<Job> {
        self.repository
            .load(job_id)
            .await?
            .ok_or(LifecycleError::NotFound { job_id })
    }

    async fn authorize(
        &self,
        job: &Job,
        actor_id: Uuid,
    ) -> LifecycleResult<crate::state_machine::ActorRole> {
        self.resolver
            .resolve_role(job, actor_id)
            .await
            .ok_or(LifecycleError::Forbidden {
                job_id: job.job_id,
                actor_id,
            })
    }
}
