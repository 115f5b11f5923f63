//! Actor identity resolution boundary.

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::Job;
use crate::state_machine::ActorRole;

/// Resolves which party of a job a caller is. `None` means the caller is
/// neither party and every gated operation answers `Forbidden`.
#[async_trait]
pub trait ActorResolver: Send + Sync {
    async fn resolve_role(&self, job: &Job, actor_id: Uuid) -> Option<ActorRole>;
}

/// Default resolver: match the caller against the job's own party
/// references. Deployments with a separate identity store (delegated
/// accounts, support operators) substitute their own implementation.
#[derive(Debug, Default, Clone, Copy)]
pub struct PartyResolver;

#[async_trait]
impl ActorResolver for PartyResolver {
    async fn resolve_role(&self, job: &Job, actor_id: Uuid) -> Option<ActorRole> {
        job.party_role(actor_id)
    }
}
