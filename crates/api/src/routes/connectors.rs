//! Connector level volume endpoints

use crate::{
    helpers::{aggregation, unknown_connector, warehouse_error},
    state::ApiState,
    validation::{LookbackQuery, resolve_lookback},
};
use api_types::*;
use axum::{
    Json,
    extract::{Path, Query, State},
};

#[utoipa::path(
    get,
    path = "/connectors",
    params(
        LookbackQuery
    ),
    responses(
        (status = 200, description = "Connectors active in the window", body = ConnectorsResponse),
        (status = 400, description = "Invalid lookback window", body = ErrorResponse),
        (status = 500, description = "Database error", body = ErrorResponse)
    ),
    tag = "syncscope"
)]
/// List connectors that modified rows in the window
pub async fn connectors(
    Query(params): Query<LookbackQuery>,
    State(state): State<ApiState>,
) -> Result<Json<ConnectorsResponse>, ErrorResponse> {
    let lookback = resolve_lookback(&params)?;
    let records =
        state.volume_records(lookback).await.map_err(|e| warehouse_error("get connectors", &e))?;

    let connectors = aggregation::connector_summaries(&records);
    tracing::info!(count = connectors.len(), "Returning connectors");
    Ok(Json(ConnectorsResponse { lookback_days: lookback.days(), connectors }))
}

#[utoipa::path(
    get,
    path = "/connectors/{connector_id}/volume",
    params(
        ("connector_id" = String, Path, description = "Connector ID"),
        LookbackQuery
    ),
    responses(
        (status = 200, description = "Connector total and per-schema volume", body = ConnectorVolumeResponse),
        (status = 400, description = "Invalid lookback window", body = ErrorResponse),
        (status = 404, description = "Connector has no activity in the window", body = ErrorResponse),
        (status = 500, description = "Database error", body = ErrorResponse)
    ),
    tag = "syncscope"
)]
/// Get a connector's total row volume and its volume per month and schema
pub async fn connector_volume(
    Path(connector_id): Path<String>,
    Query(params): Query<LookbackQuery>,
    State(state): State<ApiState>,
) -> Result<Json<ConnectorVolumeResponse>, ErrorResponse> {
    let lookback = resolve_lookback(&params)?;
    let records = state
        .volume_records(lookback)
        .await
        .map_err(|e| warehouse_error("get connector volume", &e))?;
    if !aggregation::has_connector(&records, &connector_id) {
        return Err(unknown_connector(&connector_id, lookback.days()));
    }

    let total_row_volume = aggregation::connector_volume(&records, &connector_id);
    let rows = aggregation::schema_volume(&records, &connector_id);
    let schemas = aggregation::connector_schemas(&records, &connector_id);
    tracing::info!(connector_id, total_row_volume, count = rows.len(), "Returning connector volume");
    Ok(Json(ConnectorVolumeResponse {
        lookback_days: lookback.days(),
        total_row_volume,
        schemas,
        rows,
        hints: ChartHints::new("month", "schema_name", Some("row_volume")),
        connector_id,
    }))
}

#[utoipa::path(
    get,
    path = "/connectors/{connector_id}/schemas/{schema_name}/tables",
    params(
        ("connector_id" = String, Path, description = "Connector ID"),
        ("schema_name" = String, Path, description = "Destination schema"),
        LookbackQuery
    ),
    responses(
        (status = 200, description = "Per-table volume of a schema", body = SchemaTablesResponse),
        (status = 400, description = "Invalid lookback window", body = ErrorResponse),
        (status = 404, description = "Connector has no activity in the window", body = ErrorResponse),
        (status = 500, description = "Database error", body = ErrorResponse)
    ),
    tag = "syncscope"
)]
/// Get the volume per month and table of one connector schema
pub async fn schema_tables(
    Path((connector_id, schema_name)): Path<(String, String)>,
    Query(params): Query<LookbackQuery>,
    State(state): State<ApiState>,
) -> Result<Json<SchemaTablesResponse>, ErrorResponse> {
    let lookback = resolve_lookback(&params)?;
    let records = state
        .volume_records(lookback)
        .await
        .map_err(|e| warehouse_error("get schema tables", &e))?;
    if !aggregation::has_connector(&records, &connector_id) {
        return Err(unknown_connector(&connector_id, lookback.days()));
    }

    let rows = aggregation::table_volume(&records, &connector_id, &schema_name);
    let tables = aggregation::schema_tables(&records, &connector_id, &schema_name);
    tracing::info!(connector_id, schema_name, count = rows.len(), "Returning schema tables");
    Ok(Json(SchemaTablesResponse {
        lookback_days: lookback.days(),
        tables,
        rows,
        hints: ChartHints::new("month", "table_name", Some("row_volume")),
        connector_id,
        schema_name,
    }))
}

#[utoipa::path(
    get,
    path = "/connectors/{connector_id}/schemas/{schema_name}/tables/{table_name}",
    params(
        ("connector_id" = String, Path, description = "Connector ID"),
        ("schema_name" = String, Path, description = "Destination schema"),
        ("table_name" = String, Path, description = "Destination table"),
        LookbackQuery
    ),
    responses(
        (status = 200, description = "Row volume per month of one table", body = TableVolumeResponse),
        (status = 400, description = "Invalid lookback window", body = ErrorResponse),
        (status = 404, description = "Connector has no activity in the window", body = ErrorResponse),
        (status = 500, description = "Database error", body = ErrorResponse)
    ),
    tag = "syncscope"
)]
/// Get the row volume per month of a single table
pub async fn table_volume(
    Path((connector_id, schema_name, table_name)): Path<(String, String, String)>,
    Query(params): Query<LookbackQuery>,
    State(state): State<ApiState>,
) -> Result<Json<TableVolumeResponse>, ErrorResponse> {
    let lookback = resolve_lookback(&params)?;
    let records = state
        .volume_records(lookback)
        .await
        .map_err(|e| warehouse_error("get table volume", &e))?;
    if !aggregation::has_connector(&records, &connector_id) {
        return Err(unknown_connector(&connector_id, lookback.days()));
    }

    let rows = aggregation::single_table_volume(
        &records,
        &connector_id,
        Some(schema_name.as_str()),
        &table_name,
    );
    tracing::info!(connector_id, table_name, count = rows.len(), "Returning table volume");
    Ok(Json(TableVolumeResponse {
        lookback_days: lookback.days(),
        rows,
        hints: ChartHints::monthly_volume(),
        connector_id,
        schema_name,
        table_name,
    }))
}
