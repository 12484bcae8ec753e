use std::sync::Arc;

use anyhow::{Context, Result};
use city_info_gateway::{AppState, GatewayConfig, RecipeStore, UpstreamClient, logging, web};

#[tokio::main]
async fn main() -> Result<()> {
    let config = GatewayConfig::load().context("Failed to load configuration")?;
    logging::init(&config.logging)?;

    let upstream = UpstreamClient::new(&config.upstream)?;
    let state = AppState::new(Arc::new(RecipeStore::new()), Arc::new(upstream));

    tracing::info!(
        "Using city insights at {} and weather predictions at {}",
        config.upstream.city_api_url,
        config.upstream.weather_api_url
    );

    web::run(
        &config.server,
        state,
        |handle| tracing::info!("City info gateway listening on {}", handle.local_addr),
        web::shutdown_signal(),
    )
    .await
}
