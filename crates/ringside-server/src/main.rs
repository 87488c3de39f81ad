use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ringside_cache::{init_database, RedbSnapshotCache};
use ringside_server::{routes, AppState, Config};
use ringside_sync::{HttpRemoteStore, SyncCoordinator};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            eprintln!("Required: RINGSIDE_REMOTE_URL=<url>");
            eprintln!(
                "Optional: RINGSIDE_REMOTE_KEY, RINGSIDE_LISTEN_ADDR, RINGSIDE_CACHE_PATH"
            );
            std::process::exit(1);
        }
    };

    tracing::info!("Starting Ringside server");
    tracing::info!("Remote store: {}", config.remote_url);
    tracing::info!("Listen address: {}", config.listen_addr);
    tracing::info!("Cache path: {}", config.cache_path.display());

    // Initialize the fallback cache
    let db = match init_database(&config.cache_path) {
        Ok(db) => db,
        Err(e) => {
            eprintln!("Cache database error: {}", e);
            std::process::exit(1);
        }
    };
    let cache = Arc::new(RedbSnapshotCache::new(db));

    let remote = Arc::new(HttpRemoteStore::new(
        config.remote_url.clone(),
        config.remote_key.clone(),
    ));

    // Build the working set: remote when reachable, cache otherwise
    let mut coordinator = SyncCoordinator::new(remote, cache);
    coordinator.load().await;
    tracing::info!(
        "Loaded {} fighters, {} fights",
        coordinator.fighters().len(),
        coordinator.fights().len()
    );

    let state = AppState::new(coordinator);
    let app = routes::create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Server running at http://{}", config.listen_addr);

    axum::serve(listener, app).await.expect("Server error");
}
