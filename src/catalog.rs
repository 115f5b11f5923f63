//! Read-only catalog boundary, consumed at booking creation.

use async_trait::async_trait;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::Pricing;

/// Catalog offering as seen by the booking core
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Offering {
    pub offering_id: Uuid,
    pub vendor_id: Uuid,
    pub title: String,
    pub pricing: Pricing,
    pub active: bool,
}

/// Catalog lookup boundary. Implementations return only offerings that are
/// currently bookable; a paused or deleted offering resolves to `None`.
#[async_trait]
pub trait CatalogLookup: Send + Sync {
    async fn get_active_offering(&self, offering_id: Uuid) -> Option<Offering>;
}

/// Fixed in-process catalog, for embedding and tests
#[derive(Debug, Default)]
pub struct StaticCatalog {
    offerings: DashMap<Uuid, Offering>,
}

impl StaticCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_offering(&self, offering: Offering) {
        self.offerings.insert(offering.offering_id, offering);
    }
}

#[async_trait]
impl CatalogLookup for StaticCatalog {
    async fn get_active_offering(&self, offering_id: Uuid) -> Option<Offering> {
        self.offerings
            .get(&offering_id)
            .filter(|offering| offering.active)
            .map(|offering| offering.value().clone())
    }
}
