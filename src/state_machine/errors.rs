use thiserror::Error;
use uuid::Uuid;

use super::states::JobState;
use super::transitions::ActorRole;
use crate::repository::RepositoryError;

/// Error kinds surfaced by the booking lifecycle core.
///
/// Every rejected transition carries enough context for the caller to render
/// an accurate message: `InvalidTransition` includes the full
/// (current, requested, role) triple. `Conflict` is the only retryable kind;
/// the core never retries on its own because a re-submitted request may no
/// longer be the actor's intent.
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("Job {job_id} not found")]
    NotFound { job_id: Uuid },

    #[error("Actor {actor_id} is neither the customer nor the vendor of job {job_id}")]
    Forbidden { job_id: Uuid, actor_id: Uuid },

    #[error("Invalid transition from {current} to {requested} for {role}")]
    InvalidTransition {
        current: JobState,
        requested: JobState,
        role: ActorRole,
    },

    #[error("Concurrent modification detected for job {job_id}")]
    Conflict { job_id: Uuid },

    #[error("Validation failed: {reason}")]
    Validation { reason: String },

    #[error("Repository operation failed: {0}")]
    Repository(RepositoryError),
}

impl LifecycleError {
    /// Whether the caller may re-read the job and retry the same request.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }
}

/// Repository failures with lifecycle meaning keep their kind; everything
/// else is wrapped as an opaque repository error.
impl From<RepositoryError> for LifecycleError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { job_id } => Self::NotFound { job_id },
            RepositoryError::Conflict { job_id } => Self::Conflict { job_id },
            other => Self::Repository(other),
        }
    }
}

/// Result type alias for lifecycle operations
pub type LifecycleResult<T> = Result<T, LifecycleError>;

/// Helper function to create validation errors
pub fn validation_error(reason: impl Into<String>) -> LifecycleError {
    LifecycleError::Validation {
        reason: reason.into(),
    }
}
