//! PostgreSQL job store. Jobs persist as one JSONB document per row with a
//! version column; optimistic concurrency is a conditional `UPDATE` on
//! (job_id, version).

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use super::{JobRepository, RepositoryError, RepositoryResult};
use crate::models::Job;

const CREATE_TABLE_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS marketplace_jobs (
    job_id UUID PRIMARY KEY,
    status TEXT NOT NULL,
    version BIGINT NOT NULL,
    document JSONB NOT NULL,
    created_at TIMESTAMPTZ NOT NULL,
    updated_at TIMESTAMPTZ NOT NULL
)
"#;

#[derive(Debug, Clone)]
pub struct PgJobRepository {
    pool: PgPool,
}

impl PgJobRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the jobs table if it does not exist yet
    pub async fn ensure_schema(&self) -> RepositoryResult<()> {
        sqlx::query(CREATE_TABLE_SQL)
            .execute(&self.pool)
            .await
            .map_err(backend_error)?;
        Ok(())
    }
}

#[async_trait]
impl JobRepository for PgJobRepository {
    async fn load(&self, job_id: Uuid) -> RepositoryResult<Option<Job>> {
        let row = sqlx::query("SELECT document FROM marketplace_jobs WHERE job_id = $1")
            .bind(job_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(backend_error)?;

        match row {
            Some(row) => {
                let document: serde_json::Value = row.try_get("document").map_err(backend_error)?;
                let job = serde_json::from_value(document)?;
                Ok(Some(job))
            }
            None => Ok(None),
        }
    }

    async fn insert(&self, job: Job) -> RepositoryResult<Job> {
        let document = serde_json::to_value(&job)?;
        let result = sqlx::query(
            r#"
            INSERT INTO marketplace_jobs (job_id, status, version, document, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (job_id) DO NOTHING
            "#,
        )
        .bind(job.job_id)
        .bind(job.status.to_string())
        .bind(job.version)
        .bind(document)
        .bind(job.created_at)
        .bind(job.updated_at)
        .execute(&self.pool)
        .await
        .map_err(backend_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::DuplicateId { job_id: job.job_id });
        }
        Ok(job)
    }

    async fn save(&self, job: Job, expected_version: i64) -> RepositoryResult<Job> {
        let mut stored = job;
        stored.version = expected_version + 1;
        let document = serde_json::to_value(&stored)?;

        let result = sqlx::query(
            r#"
            UPDATE marketplace_jobs
            SET status = $3, version = $4, document = $5, updated_at = $6
            WHERE job_id = $1 AND version = $2
            "#,
        )
        .bind(stored.job_id)
        .bind(expected_version)
        .bind(stored.status.to_string())
        .bind(stored.version)
        .bind(document)
        .bind(stored.updated_at)
        .execute(&self.pool)
        .await
        .map_err(backend_error)?;

        if result.rows_affected() == 0 {
            // Distinguish a vanished row from a lost race
            let exists = sqlx::query("SELECT 1 FROM marketplace_jobs WHERE job_id = $1")
                .bind(stored.job_id)
                .fetch_optional(&self.pool)
                .await
                .map_err(backend_error)?;

            return Err(match exists {
                Some(_) => RepositoryError::Conflict {
                    job_id: stored.job_id,
                },
                None => RepositoryError::NotFound {
                    job_id: stored.job_id,
                },
            });
        }

        Ok(stored)
    }
}

fn backend_error(err: sqlx::Error) -> RepositoryError {
    RepositoryError::Backend {
        reason: err.to_string(),
    }
}
