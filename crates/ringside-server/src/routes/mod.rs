pub mod api;
pub mod commands;
pub mod health;

use axum::Router;
use tower_http::cors::CorsLayer;

use ringside_core::SnapshotCache;
use ringside_sync::RemoteStore;

use crate::state::AppState;

pub fn create_router<R, C>(state: AppState<R, C>) -> Router
where
    R: RemoteStore + 'static,
    C: SnapshotCache + 'static,
{
    Router::new()
        .merge(api::routes())
        .merge(commands::routes())
        .merge(health::routes())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
