//! Persistence boundary for jobs.
//!
//! Every operation in the core is load, mutate a working copy, save with the
//! version observed at load time. `save` must guarantee that two writers
//! holding the same observed version cannot both succeed.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::Job;

pub mod memory;
#[cfg(feature = "postgres")]
pub mod postgres;

pub use memory::InMemoryJobRepository;
#[cfg(feature = "postgres")]
pub use postgres::PgJobRepository;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Job {job_id} not found")]
    NotFound { job_id: Uuid },

    #[error("Concurrent modification detected for job {job_id}")]
    Conflict { job_id: Uuid },

    #[error("Job {job_id} already exists")]
    DuplicateId { job_id: Uuid },

    #[error("Job document serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage backend error: {reason}")]
    Backend { reason: String },
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Job persistence with per-job optimistic concurrency.
#[async_trait]
pub trait JobRepository: Send + Sync {
    /// Fetch a job by id. `Ok(None)` when no such job exists.
    async fn load(&self, job_id: Uuid) -> RepositoryResult<Option<Job>>;

    /// Store a newly created job. Fails with `DuplicateId` if the id is taken.
    async fn insert(&self, job: Job) -> RepositoryResult<Job>;

    /// Atomically replace the stored job if and only if its current version
    /// equals `expected_version`. The returned job carries the bumped
    /// version. Fails with `Conflict` when another writer got there first.
    async fn save(&self, job: Job, expected_version: i64) -> RepositoryResult<Job>;
}
