use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use super::{ApiError, AppState};
use crate::models::{SearchResult, SourceSelection};

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub query: String,

    #[serde(default = "default_sources")]
    pub sources: Vec<String>,
}

fn default_sources() -> Vec<String> {
    vec!["all".to_string()]
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub success: bool,
    pub results: Vec<SearchResult>,
    pub cached: bool,
    pub total: usize,
}

pub async fn search(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, ApiError> {
    info!(
        "Searching for '{}' from sources: {}",
        request.query,
        request.sources.join(", ")
    );

    let selection = SourceSelection::from_request(&request.sources);
    let outcome = state
        .search_service()
        .search(&request.query, &selection)
        .await?;

    Ok(Json(SearchResponse {
        success: true,
        total: outcome.results.len(),
        results: outcome.results,
        cached: outcome.cached,
    }))
}

/// Bare preflight handler; the CORS layer attaches the actual headers.
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}
