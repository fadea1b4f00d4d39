use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use chrono::Utc;
use serde_json::json;
use uuid::Uuid;

use crate::constants::{API_NAME, DELETED_MESSAGE, NOT_FOUND_MESSAGE};
use crate::error::AppError;
use crate::handlers::extract::{ValidatedJson, ValidatedPath, ValidatedQuery};
use crate::models::{Page, PageParams, ParkingSpot, ParkingSpotDto};
use crate::repository::UniqueField;
use crate::service::ParkingSpotService;

pub fn router() -> Router<ParkingSpotService> {
    Router::new()
        .route("/", get(get_all_parking_spots).post(save_parking_spot))
        .route(
            "/:id",
            get(get_one_parking_spot)
                .put(update_parking_spot)
                .delete(delete_parking_spot),
        )
}

async fn save_parking_spot(
    State(service): State<ParkingSpotService>,
    ValidatedJson(dto): ValidatedJson<ParkingSpotDto>,
) -> Result<(StatusCode, Json<ParkingSpot>), AppError> {
    // Friendly fast path; the store's unique constraints remain authoritative.
    if service.exists_by_license_plate_car(&dto.license_plate_car).await? {
        return Err(AppError::Conflict(UniqueField::LicensePlateCar));
    }
    if service
        .exists_by_parking_spot_number(&dto.parking_spot_number)
        .await?
    {
        return Err(AppError::Conflict(UniqueField::ParkingSpotNumber));
    }
    if service
        .exists_by_apartment_and_block(&dto.apartment, &dto.block)
        .await?
    {
        return Err(AppError::Conflict(UniqueField::ApartmentAndBlock));
    }

    let spot = dto.into_entity(Uuid::new_v4(), Utc::now());
    tracing::info!(
        "{} Registering parking spot {} for plate {}",
        API_NAME,
        spot.parking_spot_number,
        spot.license_plate_car
    );

    let saved = service.save(&spot).await?;
    Ok((StatusCode::CREATED, Json(saved)))
}

async fn get_all_parking_spots(
    State(service): State<ParkingSpotService>,
    ValidatedQuery(params): ValidatedQuery<PageParams>,
) -> Result<Json<Page<ParkingSpot>>, AppError> {
    let request = params.into_request().map_err(AppError::Validation)?;
    let page = service.find_all(&request).await?;
    Ok(Json(page))
}

async fn get_one_parking_spot(
    State(service): State<ParkingSpotService>,
    ValidatedPath(id): ValidatedPath<Uuid>,
) -> Result<Json<ParkingSpot>, AppError> {
    let spot = service
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found(NOT_FOUND_MESSAGE))?;
    Ok(Json(spot))
}

async fn delete_parking_spot(
    State(service): State<ParkingSpotService>,
    ValidatedPath(id): ValidatedPath<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let spot = service
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found(NOT_FOUND_MESSAGE))?;

    if !service.delete(&spot).await? {
        return Err(AppError::not_found(NOT_FOUND_MESSAGE));
    }

    Ok(Json(json!({ "message": DELETED_MESSAGE })))
}

async fn update_parking_spot(
    State(service): State<ParkingSpotService>,
    ValidatedPath(id): ValidatedPath<Uuid>,
    ValidatedJson(dto): ValidatedJson<ParkingSpotDto>,
) -> Result<Json<ParkingSpot>, AppError> {
    let existing = service
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found(NOT_FOUND_MESSAGE))?;

    let spot = dto.into_entity(existing.id, existing.registration_date);
    tracing::info!("{} Updating parking spot: {}", API_NAME, spot.id);

    // Deleted between the lookup and the write.
    let updated = service
        .update(&spot)
        .await?
        .ok_or_else(|| AppError::not_found(NOT_FOUND_MESSAGE))?;
    Ok(Json(updated))
}
