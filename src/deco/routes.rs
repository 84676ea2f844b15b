//! HTTP route handlers for the decompression API.

use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
    routing::{get, post},
    Router,
};

use crate::error::Result;
use crate::AppState;

use super::models::{
    DecompressionRequest, DecompressionResult, DepthPreview, DepthRange, TableInfo, TABLE_NAME,
};
use super::resolver::DecoError;

/// Create the decompression router with all endpoints.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/calculate", post(calculate))
        .route("/table-info", get(table_info))
}

/// Health check for the table engine.
async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    let table = state.resolver.table();
    Json(serde_json::json!({
        "status": "ok",
        "service": "deco-tables",
        "table": TABLE_NAME,
        "entries": table.len(),
        "table_digest": table.digest(),
    }))
}

/// Resolve dive parameters into a decompression schedule.
///
/// Malformed bodies are reported the same way as out-of-range values.
async fn calculate(
    State(state): State<AppState>,
    payload: std::result::Result<Json<DecompressionRequest>, JsonRejection>,
) -> Result<Json<DecompressionResult>> {
    let Json(request) = payload.map_err(|e| DecoError::InvalidRequest(e.body_text()))?;
    let result = state.resolver.resolve(&request)?;
    Ok(Json(result))
}

/// Depths and a preview of bottom times, for client-side input hints.
async fn table_info(State(state): State<AppState>) -> Json<TableInfo> {
    let table = state.resolver.table();
    let available_depths = table.available_depths();
    let (min, max) = table.depth_range();

    let sample_depth_times = available_depths
        .iter()
        .take(state.config.preview_depths)
        .map(|&depth| {
            let times = table.available_times(depth);
            DepthPreview {
                depth,
                total_entries: times.len(),
                times: times.into_iter().take(state.config.preview_times).collect(),
            }
        })
        .collect();

    Json(TableInfo {
        table_name: TABLE_NAME,
        total_depths: available_depths.len(),
        depth_range: DepthRange { min, max },
        available_depths,
        sample_depth_times,
        table_digest: table.digest().to_string(),
        loaded_at: table.loaded_at(),
    })
}
