use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::Json;

use super::error::ApiError;
use super::responses::{HealthResponse, PointsResponse, ProcessResponse};
use super::AppState;

pub async fn process_receipt(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ProcessResponse>, ApiError> {
    let id = state.service.submit_json(&body)?;
    Ok(Json(ProcessResponse { id }))
}

pub async fn get_points(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PointsResponse>, ApiError> {
    let points = state.service.lookup(&id)?;
    Ok(Json(PointsResponse { points }))
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        receipts: state.service.stored_count(),
    })
}
