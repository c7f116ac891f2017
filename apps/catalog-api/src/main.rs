use axum_helpers::{cors_layer_from_origins, create_production_app, create_router};
use core_config::FromEnv;
use core_config::tracing::{init_tracing, install_color_eyre};
use database::common::RetryPolicy;
use database::mongodb::connect_from_config_with_retry;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);
    axum_helpers::expose_internal_errors(config.environment.is_development());

    info!("Connecting to MongoDB at {}", config.mongodb.redacted_url());
    let mongo_client =
        connect_from_config_with_retry(&config.mongodb, &RetryPolicy::default()).await?;
    let db = mongo_client.database(&config.mongodb.database);
    info!("Connected to MongoDB database: {}", config.mongodb.database);

    api::catalog::init_indexes(&db).await?;

    let state = AppState {
        config,
        mongo_client,
        db,
    };

    let cors = cors_layer_from_origins(state.config.cors_allowed_origin.as_deref())
        .map_err(|e| eyre::eyre!("Invalid CORS_ALLOWED_ORIGIN: {}", e))?;
    let router = create_router::<openapi::ApiDoc>(api::routes(&state), cors);

    let shutdown_timeout = state.config.shutdown_timeout;
    info!(
        "Starting Catalog API with graceful shutdown ({}s timeout)",
        shutdown_timeout.as_secs()
    );

    let server_config = state.config.server.clone();
    create_production_app(router, &server_config, shutdown_timeout, async move {
        info!("Shutting down: closing MongoDB connections");
        drop(state);
        info!("MongoDB connection closed");
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Catalog API shutdown complete");
    Ok(())
}
