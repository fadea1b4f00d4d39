pub mod errors;
pub mod memory_repo;
pub mod parking_spot_repo;

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{Page, PageRequest, ParkingSpot};

pub use errors::{StoreError, UniqueField};
pub use memory_repo::InMemoryParkingSpotStore;
pub use parking_spot_repo::PgParkingSpotRepository;

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence contract for parking spots, keyed by `id`.
///
/// `save`, `update` and `delete_by_id` are atomic: a failed write leaves no partial
/// state behind. Implementations enforce the three uniqueness rules and report
/// violations as [`StoreError::Conflict`].
#[async_trait]
pub trait ParkingSpotStore: Send + Sync {
    /// Inserts the record, or replaces the one with the same `id`.
    async fn save(&self, spot: &ParkingSpot) -> StoreResult<ParkingSpot>;
    /// Replaces the fields of an existing record, keeping its `id` and
    /// registration date. Returns `None` without writing when no record has that id.
    async fn update(&self, spot: &ParkingSpot) -> StoreResult<Option<ParkingSpot>>;
    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<ParkingSpot>>;
    /// Returns `false` when no record had that id.
    async fn delete_by_id(&self, id: Uuid) -> StoreResult<bool>;
    async fn exists_by_license_plate_car(&self, license_plate_car: &str) -> StoreResult<bool>;
    async fn exists_by_parking_spot_number(&self, parking_spot_number: &str) -> StoreResult<bool>;
    async fn exists_by_apartment_and_block(&self, apartment: &str, block: &str)
        -> StoreResult<bool>;
    async fn find_all(&self, request: &PageRequest) -> StoreResult<Page<ParkingSpot>>;
    /// Cheap round-trip used by the health endpoint.
    async fn ping(&self) -> StoreResult<()>;
}
