use thiserror::Error;

use crate::repository::RepositoryError;
use crate::state_machine::LifecycleError;

/// Top-level error type for embedding the booking core.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Lifecycle error: {0}")]
    Lifecycle(#[from] LifecycleError),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
