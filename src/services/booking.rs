//! Booking-request flow: the one place jobs are created.

use std::sync::Arc;

use uuid::Uuid;

use crate::catalog::CatalogLookup;
use crate::constants::events::JOB_REQUESTED;
use crate::events::EventPublisher;
use crate::models::{Job, NewJobRequest};
use crate::repository::JobRepository;
use crate::state_machine::{validation_error, LifecycleResult};

pub struct BookingService {
    catalog: Arc<dyn CatalogLookup>,
    repository: Arc<dyn JobRepository>,
    event_publisher: EventPublisher,
}

impl BookingService {
    pub fn new(
        catalog: Arc<dyn CatalogLookup>,
        repository: Arc<dyn JobRepository>,
        event_publisher: EventPublisher,
    ) -> Self {
        Self {
            catalog,
            repository,
            event_publisher,
        }
    }

    /// Create a `pending` job from a booking request. The offering must be
    /// active; vendor identity and pricing terms are taken from it, never
    /// from the caller.
    pub async fn create_booking(&self, request: NewJobRequest) -> LifecycleResult<Job> {
        let offering = self
            .catalog
            .get_active_offering(request.offering_id)
            .await
            .ok_or_else(|| {
                validation_error(format!(
                    "offering {} is not available for booking",
                    request.offering_id
                ))
            })?;

        let job = Job::from_request(request, &offering);
        let stored = self.repository.insert(job).await?;

        self.event_publisher.publish(
            JOB_REQUESTED,
            serde_json::json!({
                "job_id": stored.job_id,
                "customer_id": stored.customer_id,
                "vendor_id": stored.vendor_id,
                "service_ref": stored.service_ref,
            }),
        );

        tracing::info!(
            job_id = %stored.job_id,
            customer_id = %stored.customer_id,
            vendor_id = %stored.vendor_id,
            "Booking created"
        );
        Ok(stored)
    }

    /// Fetch a job for display. Thin pass-through kept here so transports
    /// never talk to the repository directly.
    pub async fn get_job(&self, job_id: Uuid) -> LifecycleResult<Option<Job>> {
        Ok(self.repository.load(job_id).await?)
    }
}
