use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{patch, post, put},
    Json, Router,
};
use serde::Deserialize;

use ringside_core::{Division, Fight, SnapshotCache, ValidationError};
use ringside_sync::{FightPatch, RemoteStore};

use crate::state::AppState;

pub fn routes<R, C>() -> Router<AppState<R, C>>
where
    R: RemoteStore + 'static,
    C: SnapshotCache + 'static,
{
    Router::new()
        .route("/fighters", post(add_fighter::<R, C>))
        .route(
            "/fighters/{name}",
            patch(rename_fighter::<R, C>).delete(delete_fighter::<R, C>),
        )
        .route("/fights", post(add_fight::<R, C>))
        .route(
            "/fights/{index}",
            patch(edit_fight::<R, C>).delete(delete_fight::<R, C>),
        )
        .route("/champions/{division}", put(set_champion::<R, C>))
}

/// Map a validation rejection to the response the UI shows the user.
fn reject(err: ValidationError) -> Response {
    let status = match &err {
        ValidationError::DuplicateFighter { .. } | ValidationError::NameTaken(_) => {
            StatusCode::CONFLICT
        }
        ValidationError::NoSuchFight { .. } | ValidationError::UnknownFighter(_) => {
            StatusCode::NOT_FOUND
        }
        _ => StatusCode::BAD_REQUEST,
    };
    (status, err.to_string()).into_response()
}

#[derive(Deserialize)]
struct AddFighterRequest {
    name: String,
    division: Division,
}

async fn add_fighter<R: RemoteStore, C: SnapshotCache>(
    State(state): State<AppState<R, C>>,
    Json(request): Json<AddFighterRequest>,
) -> Response {
    let mut coordinator = state.coordinator.lock().await;
    match coordinator
        .add_fighter(&request.name, request.division)
        .await
    {
        Ok(()) => StatusCode::CREATED.into_response(),
        Err(e) => reject(e),
    }
}

#[derive(Deserialize)]
struct RenameRequest {
    name: String,
}

async fn rename_fighter<R: RemoteStore, C: SnapshotCache>(
    State(state): State<AppState<R, C>>,
    Path(old): Path<String>,
    Json(request): Json<RenameRequest>,
) -> Response {
    let mut coordinator = state.coordinator.lock().await;
    match coordinator.edit_fighter_name(&old, &request.name).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => reject(e),
    }
}

async fn delete_fighter<R: RemoteStore, C: SnapshotCache>(
    State(state): State<AppState<R, C>>,
    Path(name): Path<String>,
) -> Response {
    let mut coordinator = state.coordinator.lock().await;
    match coordinator.delete_fighter(&name).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => reject(e),
    }
}

async fn add_fight<R: RemoteStore, C: SnapshotCache>(
    State(state): State<AppState<R, C>>,
    Json(fight): Json<Fight>,
) -> Response {
    let mut coordinator = state.coordinator.lock().await;
    match coordinator.add_fight(fight).await {
        Ok(()) => StatusCode::CREATED.into_response(),
        Err(e) => reject(e),
    }
}

async fn edit_fight<R: RemoteStore, C: SnapshotCache>(
    State(state): State<AppState<R, C>>,
    Path(index): Path<usize>,
    Json(patch): Json<FightPatch>,
) -> Response {
    let mut coordinator = state.coordinator.lock().await;
    match coordinator.edit_fight(index, patch).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => reject(e),
    }
}

async fn delete_fight<R: RemoteStore, C: SnapshotCache>(
    State(state): State<AppState<R, C>>,
    Path(index): Path<usize>,
) -> Response {
    let mut coordinator = state.coordinator.lock().await;
    match coordinator.delete_fight(index).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => reject(e),
    }
}

#[derive(Deserialize)]
struct SetChampionRequest {
    /// Empty string vacates the title.
    #[serde(default)]
    name: String,
}

async fn set_champion<R: RemoteStore, C: SnapshotCache>(
    State(state): State<AppState<R, C>>,
    Path(division): Path<String>,
    Json(request): Json<SetChampionRequest>,
) -> Response {
    let division: Division = match division.parse() {
        Ok(d) => d,
        Err(e) => return (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
    };

    let mut coordinator = state.coordinator.lock().await;
    coordinator.set_champion(division, &request.name).await;
    StatusCode::NO_CONTENT.into_response()
}
