//! Status and manual refresh routes.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::refresh::refresh_directory;
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/status", get(status))
        .route("/directory/refresh", post(refresh))
}

async fn status(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let directory = state.orchestrator.status();
    let last_refresh = state.last_refresh.read().clone();
    let last_error = state.last_refresh_error.read().clone();
    let store = state.store.clone();
    let vendor_cameras = tokio::task::spawn_blocking(move || store.count())
        .await
        .ok()
        .and_then(|count| count.ok());

    Json(serde_json::json!({
        "source": state.config.source.to_string(),
        "provider": state.provider.name(),
        "geocoder": state.orchestrator.geocoder().name(),
        "keywordLocale": state.orchestrator.settings().keyword_locale,
        "directory": directory,
        "vendorCameras": vendor_cameras,
        "lastRefresh": last_refresh,
        "lastRefreshError": last_error,
        "historyCount": state.history.len(),
    }))
}

async fn refresh(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match refresh_directory(&state).await {
        Ok(report) => (
            StatusCode::OK,
            Json(serde_json::to_value(&report).unwrap_or_default()),
        ),
        Err(e) => (
            StatusCode::BAD_GATEWAY,
            Json(serde_json::json!({
                "error": "Directory refresh failed",
                "message": e.to_string(),
            })),
        ),
    }
}
