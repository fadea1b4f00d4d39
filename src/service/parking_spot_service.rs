use std::sync::Arc;
use uuid::Uuid;

use crate::constants::API_NAME;
use crate::models::{Page, PageRequest, ParkingSpot};
use crate::repository::{ParkingSpotStore, StoreResult};

/// Delegation layer between the HTTP handlers and the store.
///
/// Holds no business rules. Writes go through the store's atomic `save`,
/// `update` and `delete_by_id`, so a failed write never leaves partial state.
#[derive(Clone)]
pub struct ParkingSpotService {
    store: Arc<dyn ParkingSpotStore>,
}

impl ParkingSpotService {
    pub fn new(store: Arc<dyn ParkingSpotStore>) -> Self {
        Self { store }
    }

    pub async fn save(&self, spot: &ParkingSpot) -> StoreResult<ParkingSpot> {
        let saved = self.store.save(spot).await.map_err(|e| {
            tracing::warn!("{} Failed to save parking spot {}: {}", API_NAME, spot.id, e);
            e
        })?;
        tracing::info!("{} Saved parking spot: {}", API_NAME, saved.id);
        Ok(saved)
    }

    /// Returns `None` if the record no longer exists.
    pub async fn update(&self, spot: &ParkingSpot) -> StoreResult<Option<ParkingSpot>> {
        let updated = self.store.update(spot).await.map_err(|e| {
            tracing::warn!("{} Failed to update parking spot {}: {}", API_NAME, spot.id, e);
            e
        })?;
        if let Some(updated) = &updated {
            tracing::info!("{} Updated parking spot: {}", API_NAME, updated.id);
        }
        Ok(updated)
    }

    pub async fn exists_by_license_plate_car(&self, license_plate_car: &str) -> StoreResult<bool> {
        self.store.exists_by_license_plate_car(license_plate_car).await
    }

    pub async fn exists_by_parking_spot_number(&self, parking_spot_number: &str) -> StoreResult<bool> {
        self.store.exists_by_parking_spot_number(parking_spot_number).await
    }

    pub async fn exists_by_apartment_and_block(
        &self,
        apartment: &str,
        block: &str,
    ) -> StoreResult<bool> {
        self.store.exists_by_apartment_and_block(apartment, block).await
    }

    pub async fn find_all(&self, request: &PageRequest) -> StoreResult<Page<ParkingSpot>> {
        self.store.find_all(request).await
    }

    pub async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<ParkingSpot>> {
        self.store.find_by_id(id).await
    }

    pub async fn ping(&self) -> StoreResult<()> {
        self.store.ping().await
    }

    /// Returns `false` if the record was already gone.
    pub async fn delete(&self, spot: &ParkingSpot) -> StoreResult<bool> {
        let deleted = self.store.delete_by_id(spot.id).await?;
        if deleted {
            tracing::info!("{} Deleted parking spot: {}", API_NAME, spot.id);
        }
        Ok(deleted)
    }
}
