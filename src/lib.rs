//! Parking spot registration service: create, list, fetch, update and delete
//! parking spot records over HTTP, backed by Postgres or an in-memory store.

pub mod config;
pub mod constants;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod service;

use axum::Router;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use handlers::{health, parking_spot};
use service::ParkingSpotService;

/// Full application router; shared by the binary and the integration tests.
pub fn build_router(service: ParkingSpotService) -> Router {
    Router::new()
        .nest("/parking-spot", parking_spot::router())
        .merge(health::router())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
                .max_age(Duration::from_secs(3600)),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}
