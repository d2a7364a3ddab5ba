use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use cinerec_api::{
    catalog,
    config::Config,
    routes::{create_router, AppState},
    services::recommender::RecommendationEngine,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    // One-time initialization barrier: the catalog snapshot and the vector
    // space are fully built before the first request is accepted.
    let catalog = Arc::new(catalog::load_dataset(Path::new(&config.dataset_dir))?);
    let engine = Arc::new(RecommendationEngine::build(catalog.clone())?);

    let state = AppState { catalog, engine };
    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "Server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
