//! Geocoding routes: place name → coordinate and coordinate → address.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use tracing::warn;

use super::{bad_request, parse_coordinate};
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/geocode", get(geocode))
        .route("/reverse-geocode", get(reverse_geocode))
}

#[derive(Debug, Deserialize)]
pub struct GeocodeParams {
    pub query: Option<String>,
}

/// Raw strings so bad numbers get our own 400 body.
#[derive(Debug, Deserialize)]
pub struct ReverseParams {
    pub lat: Option<String>,
    pub lng: Option<String>,
}

async fn geocode(
    State(state): State<Arc<AppState>>,
    Query(params): Query<GeocodeParams>,
) -> impl IntoResponse {
    let query = params.query.unwrap_or_default();
    let query = query.trim();
    if query.is_empty() {
        return bad_request("Query parameter is required");
    }

    match state.orchestrator.geocoder().geocode(query).await {
        Ok(Some(found)) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "success": true,
                "address": found.resolved_address,
                "lat": found.coordinate.latitude,
                "lng": found.coordinate.longitude,
                "source": found.provider,
            })),
        ),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({
                "error": "Location not found",
                "message": format!("No location found for {:?}", query),
            })),
        ),
        Err(e) => {
            warn!("Geocode {:?} failed: {}", query, e);
            (
                StatusCode::BAD_GATEWAY,
                Json(serde_json::json!({
                    "error": "Geocoding failed",
                    "message": e.to_string(),
                })),
            )
        }
    }
}

async fn reverse_geocode(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ReverseParams>,
) -> impl IntoResponse {
    let coord = match parse_coordinate(params.lat.as_deref(), params.lng.as_deref()) {
        Ok(coord) => coord,
        Err(rejection) => return rejection,
    };
    let (lat, lng) = (coord.latitude, coord.longitude);

    let address = match state.orchestrator.geocoder().reverse_geocode(&coord).await {
        Ok(found) => found,
        Err(e) => {
            warn!("Reverse geocode ({}, {}) failed: {}", lat, lng, e);
            None
        }
    };
    let resolved = address.is_some();

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "success": true,
            "address": address.unwrap_or_else(|| format!("{}, {}", lat, lng)),
            "resolved": resolved,
            "coord": { "lat": lat, "lng": lng },
        })),
    )
}
