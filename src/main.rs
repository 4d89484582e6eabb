use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use cinematch_api::api::{create_router, AppState};
use cinematch_api::artifacts::ArtifactStore;
use cinematch_api::config::Config;
use cinematch_api::services::{PosterProvider, TmdbPosterProvider};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    // The catalog is required to serve anything; the similarity matrix is
    // resolved lazily on the first recommendation request.
    let artifacts = Arc::new(ArtifactStore::open(&config, reqwest::Client::new())?);
    let posters: Arc<dyn PosterProvider> = Arc::new(TmdbPosterProvider::new(&config));

    let state = AppState::new(artifacts, posters);
    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!(addr = %addr, "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}
