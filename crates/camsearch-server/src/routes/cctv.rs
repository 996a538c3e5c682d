//! Camera listing routes over the current directory snapshot.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use camsearch_core::BoundingBox;

use super::parse_coordinate;
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/cctv", get(list_in_bbox))
        .route("/cctv/nearby", get(nearby))
}

/// Map viewport. Missing edges fall back to the configured refresh area.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BboxParams {
    pub min_x: Option<f64>,
    pub max_x: Option<f64>,
    pub min_y: Option<f64>,
    pub max_y: Option<f64>,
}

/// Raw strings so bad numbers get a JSON 400 body.
#[derive(Debug, Deserialize)]
pub struct NearbyParams {
    pub lat: Option<String>,
    pub lng: Option<String>,
}

async fn list_in_bbox(
    State(state): State<Arc<AppState>>,
    Query(params): Query<BboxParams>,
) -> Json<serde_json::Value> {
    let area = state.config.refresh_bbox;
    let bbox = BoundingBox {
        min_longitude: params.min_x.unwrap_or(area.min_longitude),
        max_longitude: params.max_x.unwrap_or(area.max_longitude),
        min_latitude: params.min_y.unwrap_or(area.min_latitude),
        max_latitude: params.max_y.unwrap_or(area.max_latitude),
    };

    let cameras = state.orchestrator.in_bbox(&bbox);
    Json(serde_json::json!({
        "count": cameras.len(),
        "cameras": cameras,
    }))
}

async fn nearby(
    State(state): State<Arc<AppState>>,
    Query(params): Query<NearbyParams>,
) -> impl IntoResponse {
    let center = match parse_coordinate(params.lat.as_deref(), params.lng.as_deref()) {
        Ok(center) => center,
        Err(rejection) => return rejection,
    };
    let cameras = state.orchestrator.nearby(&center);
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "center": center,
            "radius": state.orchestrator.settings().nearby_radius,
            "count": cameras.len(),
            "cameras": cameras,
        })),
    )
}
