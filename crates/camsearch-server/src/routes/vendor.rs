//! Vendor camera table writes.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{delete, post};
use axum::{Json, Router};
use tracing::warn;

use camsearch_core::{Camera, CameraSource, CctvSource, Error};

use super::{bad_request, JsonError};
use crate::refresh::refresh_directory;
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/vendor/cameras", post(upsert_cameras))
        .route("/vendor/cameras/{id}", delete(delete_camera))
}

/// Body is a JSON array of cameras. Parsed by hand so malformed input gets
/// a JSON 400 like every other route.
async fn upsert_cameras(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<impl IntoResponse, JsonError> {
    let mut cameras: Vec<Camera> = match serde_json::from_slice(&body) {
        Ok(cameras) => cameras,
        Err(e) => return Err(bad_request(&format!("Invalid camera list: {}", e))),
    };
    for cam in &mut cameras {
        cam.source = CameraSource::Vendor;
    }

    let store = state.store.clone();
    let written = tokio::task::spawn_blocking(move || store.upsert_cameras(&cameras))
        .await
        .map_err(|e| internal_error(&e.to_string()))?
        .map_err(|e| match e {
            Error::InvalidInput(msg) => bad_request(&msg),
            other => internal_error(&other.to_string()),
        })?;

    let generation = refresh_if_vendor(&state).await;
    Ok((
        StatusCode::OK,
        Json(serde_json::json!({
            "success": true,
            "written": written,
            "generation": generation,
        })),
    ))
}

async fn delete_camera(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, JsonError> {
    let store = state.store.clone();
    let removed = tokio::task::spawn_blocking(move || store.delete_camera(&id))
        .await
        .map_err(|e| internal_error(&e.to_string()))?
        .map_err(|e| internal_error(&e.to_string()))?;

    if !removed {
        return Err((
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "error": "Camera not found" })),
        ));
    }
    let generation = refresh_if_vendor(&state).await;
    Ok((
        StatusCode::OK,
        Json(serde_json::json!({ "success": true, "generation": generation })),
    ))
}

/// Vendor edits show up in search right away when the index reads the
/// vendor table. Returns the new generation, if a refresh ran and succeeded.
async fn refresh_if_vendor(state: &AppState) -> Option<u64> {
    if !matches!(state.config.source, CctvSource::Vendor | CctvSource::Both) {
        return None;
    }
    match refresh_directory(state).await {
        Ok(report) => Some(report.generation),
        Err(e) => {
            warn!("Refresh after vendor write failed: {}", e);
            None
        }
    }
}

fn internal_error(message: &str) -> JsonError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({
            "error": "Vendor table write failed",
            "message": message,
        })),
    )
}
