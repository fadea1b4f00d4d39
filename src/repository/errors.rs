use thiserror::Error;

/// A uniqueness rule on `tb_parking_spot`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueField {
    LicensePlateCar,
    ParkingSpotNumber,
    ApartmentAndBlock,
}

impl UniqueField {
    pub fn constraint_name(&self) -> &'static str {
        match self {
            UniqueField::LicensePlateCar => "uk_parking_spot_license_plate_car",
            UniqueField::ParkingSpotNumber => "uk_parking_spot_number",
            UniqueField::ApartmentAndBlock => "uk_parking_spot_apartment_block",
        }
    }

    pub fn from_constraint(name: &str) -> Option<Self> {
        [
            UniqueField::LicensePlateCar,
            UniqueField::ParkingSpotNumber,
            UniqueField::ApartmentAndBlock,
        ]
        .into_iter()
        .find(|field| field.constraint_name() == name)
    }

    pub fn conflict_message(&self) -> &'static str {
        match self {
            UniqueField::LicensePlateCar => "License Plate Car is already in use!",
            UniqueField::ParkingSpotNumber => "Parking Spot is already in use!",
            UniqueField::ApartmentAndBlock => {
                "Parking spot already registered for this apartment/block!"
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("unique constraint '{}' violated", .0.constraint_name())]
    Conflict(UniqueField),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl StoreError {
    /// Translates a Postgres unique violation (SQLSTATE 23505) on one of the
    /// known constraints into [`StoreError::Conflict`].
    pub fn from_sqlx(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.code().as_deref() == Some("23505") {
                if let Some(field) = db_err.constraint().and_then(UniqueField::from_constraint) {
                    return StoreError::Conflict(field);
                }
            }
        }
        StoreError::Database(err)
    }
}
