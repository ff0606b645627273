//! Volume endpoints across all connectors

use crate::{
    helpers::{aggregation, warehouse_error},
    state::ApiState,
    validation::{LookbackQuery, resolve_lookback},
};
use api_types::*;
use axum::{
    Json,
    extract::{Query, State},
};

#[utoipa::path(
    get,
    path = "/volume/monthly",
    params(
        LookbackQuery
    ),
    responses(
        (status = 200, description = "Row volume per month", body = MonthlyVolumeResponse),
        (status = 400, description = "Invalid lookback window", body = ErrorResponse),
        (status = 500, description = "Database error", body = ErrorResponse)
    ),
    tag = "syncscope"
)]
/// Get row volume per month across all connectors
pub async fn monthly_volume(
    Query(params): Query<LookbackQuery>,
    State(state): State<ApiState>,
) -> Result<Json<MonthlyVolumeResponse>, ErrorResponse> {
    let lookback = resolve_lookback(&params)?;
    let records = state
        .volume_records(lookback)
        .await
        .map_err(|e| warehouse_error("get monthly volume", &e))?;

    let rows = aggregation::monthly_volume(&records);
    tracing::info!(count = rows.len(), days = lookback.days(), "Returning monthly volume");
    Ok(Json(MonthlyVolumeResponse {
        lookback_days: lookback.days(),
        rows,
        hints: ChartHints::monthly_volume(),
    }))
}
