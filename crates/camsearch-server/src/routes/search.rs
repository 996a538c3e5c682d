//! Search routes: natural-language camera search and keyword preview.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use tracing::{info, warn};

use camsearch_resolve::SearchQuery;

use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/search", post(search))
        .route("/search/keyword", get(keyword))
}

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub query: String,
}

async fn search(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SearchRequest>,
) -> impl IntoResponse {
    match state.orchestrator.search(&req.query).await {
        Ok(outcome) => {
            info!(
                "Search {:?} -> {:?} ({} cameras)",
                req.query,
                outcome.match_type,
                outcome.matches.len()
            );
            if !outcome.keyword.is_empty() {
                state.history.record(&req.query, &outcome);
            }
            (
                StatusCode::OK,
                Json(serde_json::to_value(&outcome).unwrap_or_default()),
            )
        }
        Err(e) => {
            warn!("Search {:?} failed: {}", req.query, e);
            (
                StatusCode::BAD_GATEWAY,
                Json(serde_json::json!({
                    "error": "Search could not be completed",
                    "message": e.to_string(),
                })),
            )
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct KeywordParams {
    #[serde(default)]
    pub query: String,
}

async fn keyword(
    State(state): State<Arc<AppState>>,
    Query(params): Query<KeywordParams>,
) -> Json<SearchQuery> {
    Json(state.orchestrator.query(&params.query))
}
