use anyhow::Context;
use parking_control_api::{
    build_router,
    config::{Config, StorageBackend},
    constants::API_NAME,
    repository::{InMemoryParkingSpotStore, ParkingSpotStore, PgParkingSpotRepository},
    service::ParkingSpotService,
};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = Config::from_env().context("Invalid configuration")?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "{} Starting Parking Control API on port {}",
        API_NAME,
        config.server_port
    );

    let store = build_store(&config).await?;
    let service = ParkingSpotService::new(store);
    let app = build_router(service);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    tracing::info!("{} Server listening on {}", API_NAME, addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("{} Server stopped", API_NAME);
    Ok(())
}

async fn build_store(config: &Config) -> anyhow::Result<Arc<dyn ParkingSpotStore>> {
    match config.storage_backend {
        StorageBackend::Postgres => {
            let pool = PgPoolOptions::new()
                .max_connections(config.db_max_connections)
                .connect(&config.database_url)
                .await
                .context("Failed to connect to database")?;
            tracing::info!("{} Connected to database", API_NAME);

            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .context("Failed to run database migrations")?;
            tracing::info!("{} Database migrations applied", API_NAME);

            Ok(Arc::new(PgParkingSpotRepository::new(pool)))
        }
        StorageBackend::Memory => {
            tracing::warn!(
                "{} Using in-memory storage, data will not survive a restart",
                API_NAME
            );
            Ok(Arc::new(InMemoryParkingSpotStore::new()))
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("{} Failed to listen for Ctrl-C: {}", API_NAME, e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("{} Failed to listen for SIGTERM: {}", API_NAME, e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("{} Shutdown signal received", API_NAME);
}
