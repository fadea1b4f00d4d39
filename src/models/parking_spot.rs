use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// A registered parking spot as stored and returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ParkingSpot {
    pub id: Uuid,
    pub parking_spot_number: String,
    pub license_plate_car: String,
    pub model_car: String,
    pub brand_car: String,
    pub color_car: String,
    pub responsible_name: String,
    pub apartment: String,
    pub block: String,
    pub registration_date: DateTime<Utc>,
}

/// Client-supplied fields for create and update.
///
/// Has no `id` or `registrationDate`; a client sending those keys has them
/// ignored. Missing fields default to empty strings and fail `not_blank`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct ParkingSpotDto {
    #[validate(custom(function = "not_blank"), length(max = 32))]
    pub parking_spot_number: String,
    #[validate(custom(function = "not_blank"), length(max = 32))]
    pub license_plate_car: String,
    #[validate(custom(function = "not_blank"), length(max = 70))]
    pub model_car: String,
    #[validate(custom(function = "not_blank"), length(max = 70))]
    pub brand_car: String,
    #[validate(custom(function = "not_blank"), length(max = 70))]
    pub color_car: String,
    #[validate(custom(function = "not_blank"), length(max = 130))]
    pub responsible_name: String,
    #[validate(custom(function = "not_blank"), length(max = 30))]
    pub apartment: String,
    #[validate(custom(function = "not_blank"), length(max = 30))]
    pub block: String,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("not_blank"));
    }
    Ok(())
}

impl ParkingSpotDto {
    pub fn into_entity(self, id: Uuid, registration_date: DateTime<Utc>) -> ParkingSpot {
        ParkingSpot {
            id,
            parking_spot_number: self.parking_spot_number,
            license_plate_car: self.license_plate_car,
            model_car: self.model_car,
            brand_car: self.brand_car,
            color_car: self.color_car,
            responsible_name: self.responsible_name,
            apartment: self.apartment,
            block: self.block,
            registration_date,
        }
    }
}
