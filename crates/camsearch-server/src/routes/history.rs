//! Search history routes.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{delete, get};
use axum::{Json, Router};

use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/history", get(list_history).delete(clear_history))
        .route("/history/{id}", delete(delete_record))
}

async fn list_history(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let history = state.history.list();
    Json(serde_json::json!({
        "count": history.len(),
        "history": history,
    }))
}

async fn clear_history(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let removed = state.history.clear();
    Json(serde_json::json!({ "success": true, "removed": removed }))
}

async fn delete_record(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    if state.history.remove(&id) {
        (StatusCode::OK, Json(serde_json::json!({ "success": true })))
    } else {
        (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "error": "Record not found" })),
        )
    }
}
