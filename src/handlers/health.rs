use axum::{extract::State, http::StatusCode, response::Json, routing::get, Router};
use serde::Serialize;

use crate::constants::API_NAME;
use crate::service::ParkingSpotService;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub storage: &'static str,
    pub version: &'static str,
}

pub fn router() -> Router<ParkingSpotService> {
    Router::new().route("/health", get(health_check))
}

/// Liveness plus a storage round-trip. An unreachable store yields 503.
async fn health_check(
    State(service): State<ParkingSpotService>,
) -> (StatusCode, Json<HealthResponse>) {
    let version = env!("CARGO_PKG_VERSION");
    match service.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "healthy",
                storage: "up",
                version,
            }),
        ),
        Err(e) => {
            tracing::error!("{} Health check failed: {}", API_NAME, e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "unhealthy",
                    storage: "down",
                    version,
                }),
            )
        }
    }
}
