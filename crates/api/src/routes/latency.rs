//! Sync latency endpoints

use crate::{
    helpers::{latency_percentiles, latency_series, warehouse_error},
    state::ApiState,
};
use api_types::*;
use axum::{
    Json,
    extract::{Path, State},
};

#[utoipa::path(
    get,
    path = "/connectors/{connector_id}/latency",
    params(
        ("connector_id" = String, Path, description = "Connector ID, matched case-insensitively")
    ),
    responses(
        (status = 200, description = "Sync latency percentiles and series", body = LatencyResponse),
        (status = 500, description = "Database error", body = ErrorResponse)
    ),
    tag = "syncscope"
)]
/// Get p50/p75/p95/p99 sync latency of a connector and its latency over time
pub async fn connector_latency(
    Path(connector_id): Path<String>,
    State(state): State<ApiState>,
) -> Result<Json<LatencyResponse>, ErrorResponse> {
    let records = state
        .latency_records(&connector_id)
        .await
        .map_err(|e| warehouse_error("get connector latency", &e))?;

    let percentiles = latency_percentiles(&records);
    let series = latency_series(&records);
    tracing::info!(connector_id, count = series.len(), "Returning connector latency");
    Ok(Json(LatencyResponse {
        connector_id,
        percentiles,
        series,
        hints: ChartHints::new("time_stamp", "latency_seconds", None),
    }))
}
