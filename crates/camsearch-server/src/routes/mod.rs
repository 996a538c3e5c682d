//! HTTP route handlers.

pub mod cctv;
pub mod geocode;
pub mod history;
pub mod search;
pub mod status;
pub mod vendor;

use std::sync::Arc;

use axum::http::StatusCode;
use axum::{Json, Router};
use tower_http::cors::CorsLayer;

use camsearch_core::Coordinate;

use crate::state::AppState;

pub(crate) type JsonError = (StatusCode, Json<serde_json::Value>);

/// Build the main Axum router with all routes.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .nest("/api", api_routes())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .merge(search::routes())
        .merge(cctv::routes())
        .merge(geocode::routes())
        .merge(history::routes())
        .merge(status::routes())
        .merge(vendor::routes())
}

/// Parse `lat`/`lng` query strings into a finite coordinate, or a 400 body.
pub(crate) fn parse_coordinate(
    lat: Option<&str>,
    lng: Option<&str>,
) -> Result<Coordinate, JsonError> {
    let (Some(lat), Some(lng)) = (lat, lng) else {
        return Err(bad_request("lat and lng parameters are required"));
    };
    match (lat.trim().parse::<f64>(), lng.trim().parse::<f64>()) {
        (Ok(lat), Ok(lng)) if lat.is_finite() && lng.is_finite() => {
            Ok(Coordinate::new(lat, lng))
        }
        _ => Err(bad_request("Invalid lat or lng parameters")),
    }
}

pub(crate) fn bad_request(message: &str) -> JsonError {
    (
        StatusCode::BAD_REQUEST,
        Json(serde_json::json!({ "error": message })),
    )
}
