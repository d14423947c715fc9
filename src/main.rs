use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use pantry_api::api::{create_router, AppState};
use pantry_api::config::Config;
use pantry_api::engine::Recommender;
use pantry_api::store::artifacts;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env()?;

    info!("loading model and data...");
    let loaded = artifacts::load(&config)?;

    let engine = Recommender::new(
        Arc::new(loaded.model),
        Arc::new(loaded.interactions),
        Arc::new(loaded.catalog),
    );
    let app = create_router(AppState::new(engine));

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("server running on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
