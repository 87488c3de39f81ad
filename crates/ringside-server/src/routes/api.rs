use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use ringside_core::{Champion, Division, Fight, Fighter, SnapshotCache};
use ringside_sync::RemoteStore;

use crate::state::AppState;

pub fn routes<R, C>() -> Router<AppState<R, C>>
where
    R: RemoteStore + 'static,
    C: SnapshotCache + 'static,
{
    Router::new()
        .route("/api/fighters", get(get_fighters::<R, C>))
        .route("/api/fights", get(get_fights::<R, C>))
        .route("/api/champions", get(get_champions::<R, C>))
        .route("/api/rankings/{division}", get(get_rankings::<R, C>))
}

#[derive(Deserialize)]
struct SearchQuery {
    search: Option<String>,
}

impl SearchQuery {
    fn matches(&self, candidate: &str) -> bool {
        match &self.search {
            Some(needle) => candidate.to_lowercase().contains(&needle.to_lowercase()),
            None => true,
        }
    }
}

async fn get_fighters<R: RemoteStore, C: SnapshotCache>(
    State(state): State<AppState<R, C>>,
    Query(query): Query<SearchQuery>,
) -> Json<Vec<Fighter>> {
    let coordinator = state.coordinator.lock().await;
    let fighters = coordinator
        .fighters()
        .iter()
        .filter(|f| query.matches(&f.name))
        .cloned()
        .collect();
    Json(fighters)
}

async fn get_fights<R: RemoteStore, C: SnapshotCache>(
    State(state): State<AppState<R, C>>,
    Query(query): Query<SearchQuery>,
) -> Json<Vec<Fight>> {
    let coordinator = state.coordinator.lock().await;
    let fights = coordinator
        .fights()
        .iter()
        .filter(|f| query.matches(&f.fighter1) || query.matches(&f.fighter2))
        .cloned()
        .collect();
    Json(fights)
}

async fn get_champions<R: RemoteStore, C: SnapshotCache>(
    State(state): State<AppState<R, C>>,
) -> Json<Vec<Champion>> {
    let coordinator = state.coordinator.lock().await;
    Json(coordinator.champions())
}

async fn get_rankings<R: RemoteStore, C: SnapshotCache>(
    State(state): State<AppState<R, C>>,
    Path(division): Path<String>,
) -> Response {
    let division: Division = match division.parse() {
        Ok(d) => d,
        Err(e) => return (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
    };

    let coordinator = state.coordinator.lock().await;
    Json(coordinator.ranked_fighters(division)).into_response()
}
