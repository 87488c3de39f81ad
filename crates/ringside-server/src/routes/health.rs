use axum::{routing::get, Json, Router};
use serde::Serialize;

use ringside_core::SnapshotCache;
use ringside_sync::RemoteStore;

use crate::state::AppState;

pub fn routes<R, C>() -> Router<AppState<R, C>>
where
    R: RemoteStore + 'static,
    C: SnapshotCache + 'static,
{
    Router::new().route("/health", get(health))
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}
