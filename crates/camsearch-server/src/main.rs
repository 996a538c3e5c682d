//! camsearch: CCTV keyword and location search server.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use camsearch_server::refresh::{refresh_directory, start_refresh_poller};
use camsearch_server::{build_router, AppState};

fn resolve_data_dir() -> PathBuf {
    std::env::var("CAMSEARCH_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("data"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let data_dir = resolve_data_dir();
    info!("Data directory: {}", data_dir.display());

    let config = camsearch_core::CamSearchConfig::from_env(&data_dir)?;
    let port = config.port;

    let store = camsearch_store::CameraStore::open(&config.data_paths.cameras_db)
        .map_err(|e| anyhow::anyhow!("Failed to open camera store: {}", e))?;
    let seed = &config.data_paths.vendor_seed;
    if seed.is_file() {
        if let Err(e) = store.import_json_file(seed) {
            warn!("Skipping vendor seed {}: {}", seed.display(), e);
        }
    }
    let store = Arc::new(store);

    let provider = camsearch_connectors::create_directory(&config, store.clone())
        .map_err(|e| anyhow::anyhow!("Failed to configure directory: {}", e))?;
    let geocoder = camsearch_connectors::create_geocoder(&config)
        .map_err(|e| anyhow::anyhow!("Failed to configure geocoder: {}", e))?;

    let state = Arc::new(AppState::new(config, store, provider, geocoder));

    // Serve even if the first fetch fails; the poller retries.
    if let Err(e) = refresh_directory(&state).await {
        warn!("Initial directory refresh failed: {}", e);
    }
    start_refresh_poller(state.clone());

    let app = build_router(state);

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("camsearch server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
