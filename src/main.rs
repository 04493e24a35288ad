use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use ztrip::config::{AppConfig, StoreBackend};
use ztrip::engine::{IdSource, RandomIds};
use ztrip::services::notify::email::SimulatedEmailNotifier;
use ztrip::services::store::{JsonFileStore, SqliteStore, UserStore};
use ztrip::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();

    let store: Box<dyn UserStore> = match config.store_backend {
        StoreBackend::Json => {
            tracing::info!(path = %config.users_file, "using JSON file store");
            Box::new(JsonFileStore::new(config.users_file.clone()))
        }
        StoreBackend::Sqlite => {
            tracing::info!(path = %config.database_url, "using SQLite store");
            Box::new(
                SqliteStore::open(&config.database_url)
                    .with_context(|| format!("failed to open {}", config.database_url))?,
            )
        }
    };

    let ids: Box<dyn IdSource> = match config.id_seed {
        Some(seed) => {
            tracing::info!(seed, "using seeded booking ids");
            Box::new(RandomIds::seeded(seed))
        }
        None => Box::new(RandomIds::from_entropy()),
    };

    let notifier = SimulatedEmailNotifier::new(config.support_email.clone());

    let state = Arc::new(AppState::new(config.clone(), store, Box::new(notifier), ids));
    let app = ztrip::router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!(
        seat_seed = config.seat_seed,
        sold_per_trip = config.sold_seats_per_trip,
        "starting server on {addr}"
    );

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
