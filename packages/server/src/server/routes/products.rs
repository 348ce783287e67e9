//! Read endpoints over persisted price snapshots.

use axum::extract::{Extension, Query};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::server::app::AppState;
use crate::store::ProductRow;

#[derive(Serialize)]
pub struct ProductListResponse {
    pub snapshot_time: Option<DateTime<Utc>>,
    pub count: usize,
    pub data: Vec<ProductRow>,
}

#[derive(Serialize)]
pub struct LowestResponse {
    pub limit: i64,
    pub data: Vec<ProductRow>,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Deserialize)]
pub struct LowestParams {
    pub limit: Option<i64>,
}

/// Every row of the most recent snapshot, cheapest first.
pub async fn latest_products_handler(
    Extension(state): Extension<AppState>,
) -> Result<Json<ProductListResponse>, (StatusCode, Json<ErrorResponse>)> {
    let (snapshot_time, data) = state
        .store
        .latest_snapshot()
        .await
        .map_err(internal_error)?;

    Ok(Json(ProductListResponse {
        snapshot_time,
        count: data.len(),
        data,
    }))
}

/// Cheapest rows overall. `limit` is clamped to 1..=50, default 10.
pub async fn lowest_products_handler(
    Extension(state): Extension<AppState>,
    Query(params): Query<LowestParams>,
) -> Result<Json<LowestResponse>, (StatusCode, Json<ErrorResponse>)> {
    let limit = params.limit.unwrap_or(10).clamp(1, 50);
    let data = state
        .store
        .lowest_priced(limit)
        .await
        .map_err(internal_error)?;

    Ok(Json(LowestResponse { limit, data }))
}

fn internal_error(e: anyhow::Error) -> (StatusCode, Json<ErrorResponse>) {
    tracing::error!("Database error: {e:#}");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: format!("Database error: {}", e),
        }),
    )
}
