//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{infrastructure::dto::http::RoomDetailDto, ui::state::AppState, usecase::RoomInfoError};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Get room detail by ID
pub async fn get_room_detail(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
) -> Result<Json<RoomDetailDto>, StatusCode> {
    match state.room_info_usecase.room_detail(&room_id).await {
        // Domain Model から DTO への変換
        Ok(room) => Ok(Json(RoomDetailDto::from(&room))),
        Err(RoomInfoError::RoomNotFound(_)) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Failed to get room '{}': {}", room_id, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
