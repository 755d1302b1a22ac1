//! HTTP route definitions

use std::collections::BTreeMap;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::Serialize;
use tower_http::trace::TraceLayer;

use crate::app::AppState;
use crate::game::{build_payload, ObjectKind, PlayerId};
use crate::ws::handler::ws_handler;

/// Build the application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/ws", get(ws_handler))
        .route("/players/:id/view", get(player_view_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ============================================================================
// Health endpoint
// ============================================================================

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    uptime_secs: u64,
    players: usize,
    players_admitted: u64,
    map_generated: bool,
    objects: usize,
    objects_by_kind: BTreeMap<ObjectKind, usize>,
}

async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let room = state.room.read();

    let mut objects_by_kind = BTreeMap::new();
    for object in room.game_objects() {
        *objects_by_kind.entry(object.kind()).or_insert(0) += 1;
    }

    Json(HealthResponse {
        status: "ok",
        uptime_secs: state.uptime().as_secs(),
        players: room.players().len(),
        players_admitted: room.player_count(),
        map_generated: room.map_generated(),
        objects: room.game_objects().len(),
        objects_by_kind,
    })
}

// ============================================================================
// Player view
// ============================================================================

/// Snapshot payload for one player: visible objects plus camera settings
async fn player_view_handler(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Response, AppError> {
    let room = state.room.read();
    // An unknown player is the only way this fails
    let payload =
        build_payload(&room, PlayerId(id)).map_err(|err| AppError::NotFound(err.to_string()))?;
    Ok(Json(payload).into_response())
}

// ============================================================================
// Error handling
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
        };

        let body = serde_json::json!({
            "error": message
        });

        (status, Json(body)).into_response()
    }
}
