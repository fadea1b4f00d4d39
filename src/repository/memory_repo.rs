use async_trait::async_trait;
use std::cmp::Ordering;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{ParkingSpotStore, StoreError, StoreResult, UniqueField};
use crate::models::{Page, PageRequest, ParkingSpot, Sort, SortDirection, SortField};

/// Process-local store with the same uniqueness rules as the database schema.
///
/// Every write runs under a single write lock, which gives `save` and
/// `delete_by_id` the all-or-nothing behavior the trait promises.
#[derive(Default)]
pub struct InMemoryParkingSpotStore {
    spots: RwLock<HashMap<Uuid, ParkingSpot>>,
}

impl InMemoryParkingSpotStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Reports the first violated rule in plate, number, apartment/block order,
/// independent of map iteration order.
fn find_conflict(spots: &HashMap<Uuid, ParkingSpot>, candidate: &ParkingSpot) -> Option<UniqueField> {
    let others = spots.values().filter(|existing| existing.id != candidate.id);

    if others
        .clone()
        .any(|e| e.license_plate_car == candidate.license_plate_car)
    {
        return Some(UniqueField::LicensePlateCar);
    }
    if others
        .clone()
        .any(|e| e.parking_spot_number == candidate.parking_spot_number)
    {
        return Some(UniqueField::ParkingSpotNumber);
    }
    if others
        .clone()
        .any(|e| e.apartment == candidate.apartment && e.block == candidate.block)
    {
        return Some(UniqueField::ApartmentAndBlock);
    }
    None
}

fn compare_by(field: SortField, a: &ParkingSpot, b: &ParkingSpot) -> Ordering {
    match field {
        SortField::Id => a.id.cmp(&b.id),
        SortField::ParkingSpotNumber => a.parking_spot_number.cmp(&b.parking_spot_number),
        SortField::LicensePlateCar => a.license_plate_car.cmp(&b.license_plate_car),
        SortField::ModelCar => a.model_car.cmp(&b.model_car),
        SortField::BrandCar => a.brand_car.cmp(&b.brand_car),
        SortField::ColorCar => a.color_car.cmp(&b.color_car),
        SortField::ResponsibleName => a.responsible_name.cmp(&b.responsible_name),
        SortField::Apartment => a.apartment.cmp(&b.apartment),
        SortField::Block => a.block.cmp(&b.block),
        SortField::RegistrationDate => a.registration_date.cmp(&b.registration_date),
    }
}

fn compare(sort: &Sort, a: &ParkingSpot, b: &ParkingSpot) -> Ordering {
    let primary = compare_by(sort.property, a, b);
    let primary = match sort.direction {
        SortDirection::Asc => primary,
        SortDirection::Desc => primary.reverse(),
    };
    primary.then_with(|| a.id.cmp(&b.id))
}

#[async_trait]
impl ParkingSpotStore for InMemoryParkingSpotStore {
    async fn save(&self, spot: &ParkingSpot) -> StoreResult<ParkingSpot> {
        let mut spots = self.spots.write().await;

        if let Some(field) = find_conflict(&spots, spot) {
            return Err(StoreError::Conflict(field));
        }

        let mut saved = spot.clone();
        // Mirrors the upsert: an existing row keeps its registration date.
        if let Some(existing) = spots.get(&spot.id) {
            saved.registration_date = existing.registration_date;
        }
        spots.insert(saved.id, saved.clone());
        Ok(saved)
    }

    async fn update(&self, spot: &ParkingSpot) -> StoreResult<Option<ParkingSpot>> {
        let mut spots = self.spots.write().await;

        let Some(registration_date) = spots.get(&spot.id).map(|e| e.registration_date) else {
            return Ok(None);
        };
        if let Some(field) = find_conflict(&spots, spot) {
            return Err(StoreError::Conflict(field));
        }

        let updated = ParkingSpot {
            registration_date,
            ..spot.clone()
        };
        spots.insert(updated.id, updated.clone());
        Ok(Some(updated))
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<ParkingSpot>> {
        Ok(self.spots.read().await.get(&id).cloned())
    }

    async fn delete_by_id(&self, id: Uuid) -> StoreResult<bool> {
        Ok(self.spots.write().await.remove(&id).is_some())
    }

    async fn exists_by_license_plate_car(&self, license_plate_car: &str) -> StoreResult<bool> {
        let spots = self.spots.read().await;
        Ok(spots
            .values()
            .any(|s| s.license_plate_car == license_plate_car))
    }

    async fn exists_by_parking_spot_number(&self, parking_spot_number: &str) -> StoreResult<bool> {
        let spots = self.spots.read().await;
        Ok(spots
            .values()
            .any(|s| s.parking_spot_number == parking_spot_number))
    }

    async fn exists_by_apartment_and_block(
        &self,
        apartment: &str,
        block: &str,
    ) -> StoreResult<bool> {
        let spots = self.spots.read().await;
        Ok(spots
            .values()
            .any(|s| s.apartment == apartment && s.block == block))
    }

    async fn find_all(&self, request: &PageRequest) -> StoreResult<Page<ParkingSpot>> {
        let spots = self.spots.read().await;

        let mut all: Vec<&ParkingSpot> = spots.values().collect();
        all.sort_by(|a, b| compare(&request.sort, a, b));

        let offset = usize::try_from(request.offset()).unwrap_or(usize::MAX);
        let size = usize::try_from(request.size).unwrap_or(usize::MAX);
        let content = all
            .into_iter()
            .skip(offset)
            .take(size)
            .cloned()
            .collect();

        Ok(Page::new(content, request, spots.len() as u64))
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn spot(number: &str, plate: &str, apartment: &str, block: &str) -> ParkingSpot {
        ParkingSpot {
            id: Uuid::new_v4(),
            parking_spot_number: number.to_string(),
            license_plate_car: plate.to_string(),
            model_car: "Civic".to_string(),
            brand_car: "Honda".to_string(),
            color_car: "Black".to_string(),
            responsible_name: "J".to_string(),
            apartment: apartment.to_string(),
            block: block.to_string(),
            registration_date: Utc::now(),
        }
    }

    #[tokio::test]
    async fn save_then_find_and_exists() {
        let store = InMemoryParkingSpotStore::new();
        let saved = store.save(&spot("A1", "ABC123", "101", "B")).await.unwrap();

        assert_eq!(store.find_by_id(saved.id).await.unwrap(), Some(saved.clone()));
        assert!(store.exists_by_license_plate_car("ABC123").await.unwrap());
        assert!(store.exists_by_parking_spot_number("A1").await.unwrap());
        assert!(store.exists_by_apartment_and_block("101", "B").await.unwrap());
        assert!(!store.exists_by_apartment_and_block("101", "C").await.unwrap());
        assert!(store.find_by_id(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn save_rejects_duplicates_of_other_records() {
        let store = InMemoryParkingSpotStore::new();
        store.save(&spot("A1", "ABC123", "101", "B")).await.unwrap();

        let err = store.save(&spot("A2", "ABC123", "102", "B")).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict(UniqueField::LicensePlateCar)));

        let err = store.save(&spot("A1", "XYZ999", "102", "B")).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict(UniqueField::ParkingSpotNumber)));

        let err = store.save(&spot("A2", "XYZ999", "101", "B")).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict(UniqueField::ApartmentAndBlock)));
    }

    #[tokio::test]
    async fn conflict_across_records_reports_plate_first() {
        for _ in 0..50 {
            let store = InMemoryParkingSpotStore::new();
            store.save(&spot("N1", "P1", "1", "B")).await.unwrap();
            store.save(&spot("N2", "P2", "2", "B")).await.unwrap();

            // Plate matches the first record, number matches the second.
            let err = store.save(&spot("N2", "P1", "9", "B")).await.unwrap_err();
            assert!(matches!(err, StoreError::Conflict(UniqueField::LicensePlateCar)));

            // Number matches the second record, apartment/block the first.
            let err = store.save(&spot("N2", "P9", "1", "B")).await.unwrap_err();
            assert!(matches!(err, StoreError::Conflict(UniqueField::ParkingSpotNumber)));
        }
    }

    #[tokio::test]
    async fn replacing_a_record_keeps_its_registration_date() {
        let store = InMemoryParkingSpotStore::new();
        let original = store.save(&spot("A1", "ABC123", "101", "B")).await.unwrap();

        let mut replacement = original.clone();
        replacement.color_car = "Red".to_string();
        replacement.registration_date = original.registration_date + Duration::days(30);
        let saved = store.save(&replacement).await.unwrap();

        assert_eq!(saved.color_car, "Red");
        assert_eq!(saved.registration_date, original.registration_date);
    }

    #[tokio::test]
    async fn update_never_resurrects_a_missing_record() {
        let store = InMemoryParkingSpotStore::new();
        let saved = store.save(&spot("A1", "ABC123", "101", "B")).await.unwrap();
        store.delete_by_id(saved.id).await.unwrap();

        let mut replacement = saved.clone();
        replacement.color_car = "Red".to_string();
        assert!(store.update(&replacement).await.unwrap().is_none());
        assert!(store.find_by_id(saved.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_keeps_registration_date_and_checks_uniqueness() {
        let store = InMemoryParkingSpotStore::new();
        let first = store.save(&spot("A1", "ABC123", "101", "B")).await.unwrap();
        let second = store.save(&spot("A2", "XYZ999", "102", "B")).await.unwrap();

        let mut replacement = second.clone();
        replacement.color_car = "Red".to_string();
        replacement.registration_date = second.registration_date + Duration::days(1);
        let updated = store.update(&replacement).await.unwrap().unwrap();
        assert_eq!(updated.color_car, "Red");
        assert_eq!(updated.registration_date, second.registration_date);

        replacement.license_plate_car = first.license_plate_car.clone();
        let err = store.update(&replacement).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict(UniqueField::LicensePlateCar)));
    }

    #[tokio::test]
    async fn delete_reports_whether_a_record_was_removed() {
        let store = InMemoryParkingSpotStore::new();
        let saved = store.save(&spot("A1", "ABC123", "101", "B")).await.unwrap();

        assert!(store.delete_by_id(saved.id).await.unwrap());
        assert!(!store.delete_by_id(saved.id).await.unwrap());
        assert!(store.find_by_id(saved.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn find_all_sorts_and_slices() {
        let store = InMemoryParkingSpotStore::new();
        for (i, number) in ["C3", "A1", "B2", "E5", "D4"].iter().enumerate() {
            let s = spot(number, &format!("PLATE{}", i), &format!("{}", 100 + i), "B");
            store.save(&s).await.unwrap();
        }

        let request = PageRequest::new(
            0,
            2,
            Sort {
                property: SortField::ParkingSpotNumber,
                direction: SortDirection::Asc,
            },
        );
        let page = store.find_all(&request).await.unwrap();
        let numbers: Vec<_> = page.content.iter().map(|s| s.parking_spot_number.as_str()).collect();
        assert_eq!(numbers, ["A1", "B2"]);
        assert_eq!(page.total_elements, 5);
        assert_eq!(page.total_pages, 3);

        let request = PageRequest::new(
            2,
            2,
            Sort {
                property: SortField::ParkingSpotNumber,
                direction: SortDirection::Desc,
            },
        );
        let page = store.find_all(&request).await.unwrap();
        let numbers: Vec<_> = page.content.iter().map(|s| s.parking_spot_number.as_str()).collect();
        assert_eq!(numbers, ["A1"]);
        assert!(page.last);

        let page = store
            .find_all(&PageRequest::new(9, 2, Sort::default()))
            .await
            .unwrap();
        assert!(page.empty);
        assert_eq!(page.total_elements, 5);
    }

    #[tokio::test]
    async fn text_sort_uses_byte_order() {
        let store = InMemoryParkingSpotStore::new();
        for (i, number) in ["b1", "B2", "a3", "A4"].iter().enumerate() {
            let s = spot(number, &format!("PLATE{}", i), &format!("{}", 100 + i), "B");
            store.save(&s).await.unwrap();
        }

        let request = PageRequest::new(
            0,
            10,
            Sort {
                property: SortField::ParkingSpotNumber,
                direction: SortDirection::Asc,
            },
        );
        let page = store.find_all(&request).await.unwrap();
        let numbers: Vec<_> = page.content.iter().map(|s| s.parking_spot_number.as_str()).collect();
        assert_eq!(numbers, ["A4", "B2", "a3", "b1"]);
    }
}
