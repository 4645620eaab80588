pub mod api;
pub mod config;
pub mod logic;
pub mod model;
pub mod seed;
pub mod store;

// Export API types
pub use api::routes;
pub use api::{ApiError, AppState};

// Export all model types
pub use model::*;

// Export store types
pub use store::{MemoryStore, PostgresStore, Stores};

use std::sync::Arc;

use crate::config::{AppConfig, StoreBackend};

/// Build the store handles selected by configuration.
pub async fn connect_stores(config: &AppConfig) -> anyhow::Result<Stores> {
    match config.database.backend {
        StoreBackend::Memory => {
            log::warn!("Using the in-memory store; data is lost on shutdown");
            Ok(Stores::shared(Arc::new(MemoryStore::new())))
        }
        StoreBackend::Postgres => {
            let postgres_store =
                PostgresStore::new(&config.database_url(), config.max_connections()).await?;
            if config.database.bootstrap_schema {
                postgres_store.bootstrap_schema().await?;
            }
            Ok(Stores::shared(Arc::new(postgres_store)))
        }
    }
}

/// The full HTTP application over the given stores.
pub fn build_app(stores: Stores) -> axum::Router {
    crate::api::routes::create_router().with_state(AppState::new(stores))
}
