//! Data types for the syncscope API.
//!
//! These structs define the JSON responses returned by the API server. They
//! are provided in a separate crate so that consumers such as the dashboard can
//! depend on them without pulling in the rest of the server implementation.

#![allow(missing_docs)]

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Which columns a chart draws on which axis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ChartHints {
    pub x: String,
    pub y: String,
    pub color: Option<String>,
}

impl ChartHints {
    pub fn new(x: &str, y: &str, color: Option<&str>) -> Self {
        Self { x: x.to_owned(), y: y.to_owned(), color: color.map(str::to_owned) }
    }

    /// Bar chart of row volume per month, shaded by volume.
    pub fn monthly_volume() -> Self {
        Self::new("month", "row_volume", Some("row_volume"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MonthlyVolumeRow {
    pub month: String,
    pub row_volume: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SchemaVolumeRow {
    pub month: String,
    pub schema_name: String,
    pub row_volume: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TableVolumeRow {
    pub month: String,
    pub schema_name: String,
    pub table_name: String,
    pub row_volume: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ConnectorSummary {
    pub connector_id: String,
    pub connector_type_id: String,
    pub official_connector_name: String,
    pub connector_name: String,
}

/// Latency percentiles in seconds, rounded to two decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LatencyPercentiles {
    pub p50: f64,
    pub p75: f64,
    pub p95: f64,
    pub p99: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LatencyPoint {
    pub time_stamp: String,
    pub latency_seconds: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MonthlyVolumeResponse {
    pub lookback_days: u32,
    pub rows: Vec<MonthlyVolumeRow>,
    pub hints: ChartHints,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ConnectorsResponse {
    pub lookback_days: u32,
    pub connectors: Vec<ConnectorSummary>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ConnectorVolumeResponse {
    pub connector_id: String,
    pub lookback_days: u32,
    pub total_row_volume: u64,
    pub schemas: Vec<String>,
    pub rows: Vec<SchemaVolumeRow>,
    pub hints: ChartHints,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SchemaTablesResponse {
    pub connector_id: String,
    pub schema_name: String,
    pub lookback_days: u32,
    pub tables: Vec<String>,
    pub rows: Vec<TableVolumeRow>,
    pub hints: ChartHints,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TableVolumeResponse {
    pub connector_id: String,
    pub schema_name: String,
    pub table_name: String,
    pub lookback_days: u32,
    pub rows: Vec<MonthlyVolumeRow>,
    pub hints: ChartHints,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LatencyResponse {
    pub connector_id: String,
    pub percentiles: Option<LatencyPercentiles>,
    pub series: Vec<LatencyPoint>,
    pub hints: ChartHints,
}

/// Problem-details style error body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub r#type: String,
    pub title: String,
    pub status: u16,
    pub detail: String,
}

impl ErrorResponse {
    pub fn new(r#type: &str, title: &str, status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            r#type: r#type.to_owned(),
            title: title.to_owned(),
            status: status.as_u16(),
            detail: detail.into(),
        }
    }

    pub fn invalid_params(detail: impl Into<String>) -> Self {
        Self::new("invalid-params", "Bad Request", StatusCode::BAD_REQUEST, detail)
    }

    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::new("not-found", "Not Found", StatusCode::NOT_FOUND, detail)
    }

    pub fn database_error() -> Self {
        Self::new(
            "database-error",
            "Internal Server Error",
            StatusCode::INTERNAL_SERVER_ERROR,
            "Database error",
        )
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}
