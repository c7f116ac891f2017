//! Wires the catalog domain to MongoDB.

use axum::Router;
use domain_catalog::{MongoCatalogRepository, handlers};
use std::sync::Arc;
use tracing::info;

use crate::state::AppState;

/// `/categories`, `/subcategories` and `/products` over the app database
pub fn router(state: &AppState) -> Router {
    let repository = MongoCatalogRepository::new(&state.db);
    handlers::router(Arc::new(repository))
}

pub async fn init_indexes(db: &mongodb::Database) -> eyre::Result<()> {
    MongoCatalogRepository::new(db)
        .init_indexes()
        .await
        .map_err(|e| eyre::eyre!("Failed to create catalog indexes: {}", e))?;
    info!("Catalog collection indexes created");
    Ok(())
}
