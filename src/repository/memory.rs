//! In-process job store backed by a concurrent map. Used for tests and
//! single-node embedding; the per-entry lock provides the compare-and-swap
//! guarantee of the repository contract.

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use uuid::Uuid;

use super::{JobRepository, RepositoryError, RepositoryResult};
use crate::models::Job;

#[derive(Debug, Default)]
pub struct InMemoryJobRepository {
    jobs: DashMap<Uuid, Job>,
}

impl InMemoryJobRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}

#[async_trait]
impl JobRepository for InMemoryJobRepository {
    async fn load(&self, job_id: Uuid) -> RepositoryResult<Option<Job>> {
        Ok(self.jobs.get(&job_id).map(|entry| entry.value().clone()))
    }

    async fn insert(&self, job: Job) -> RepositoryResult<Job> {
        match self.jobs.entry(job.job_id) {
            Entry::Occupied(_) => Err(RepositoryError::DuplicateId { job_id: job.job_id }),
            Entry::Vacant(vacant) => {
                vacant.insert(job.clone());
                Ok(job)
            }
        }
    }

    async fn save(&self, job: Job, expected_version: i64) -> RepositoryResult<Job> {
        // The map guard is held for the whole check-and-swap, so two writers
        // with the same observed version serialize here and one must fail.
        match self.jobs.get_mut(&job.job_id) {
            None => Err(RepositoryError::NotFound { job_id: job.job_id }),
            Some(mut entry) => {
                if entry.version != expected_version {
                    return Err(RepositoryError::Conflict { job_id: job.job_id });
                }
                let mut stored = job;
                stored.version = expected_version + 1;
                *entry.value_mut() = stored.clone();
                Ok(stored)
            }
        }
    }
}
