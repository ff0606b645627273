//! HTTP API serving connector sync volume and latency aggregates

pub mod cache;
pub mod helpers;
pub mod routes;
pub mod state;
pub mod validation;

use api_types::*;
use routes::{connectors::*, latency::*, volume::*};
use utoipa::OpenApi;
use validation::LookbackQuery;

pub use api_types::ErrorResponse;
pub use routes::router;
pub use state::ApiState;

/// `OpenAPI` documentation structure
#[derive(Debug, OpenApi)]
#[openapi(
    paths(
        monthly_volume,
        connectors,
        connector_volume,
        schema_tables,
        table_volume,
        connector_latency
    ),
    components(
        schemas(
            LookbackQuery,
            ChartHints,
            MonthlyVolumeRow,
            SchemaVolumeRow,
            TableVolumeRow,
            ConnectorSummary,
            LatencyPercentiles,
            LatencyPoint,
            HealthResponse,
            MonthlyVolumeResponse,
            ConnectorsResponse,
            ConnectorVolumeResponse,
            SchemaTablesResponse,
            TableVolumeResponse,
            LatencyResponse,
            ErrorResponse
        )
    ),
    tags(
        (name = "syncscope", description = "Connector sync volume and latency endpoints")
    ),
    info(
        title = "Syncscope API",
        description = "API for connector row volume and sync latency derived from warehouse logs",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;
