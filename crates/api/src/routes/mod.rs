//! API route definitions

pub mod connectors;
pub mod latency;
pub mod volume;

use crate::{ApiDoc, state::ApiState};
use axum::{Router, routing::get};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use connectors::*;
use latency::*;
use volume::*;

/// Build the router with all API endpoints.
pub fn router(state: ApiState) -> Router {
    let api_routes = Router::new()
        .route("/volume/monthly", get(monthly_volume))
        .route("/connectors", get(connectors))
        .route("/connectors/:connector_id/volume", get(connector_volume))
        .route("/connectors/:connector_id/schemas/:schema_name/tables", get(schema_tables))
        .route(
            "/connectors/:connector_id/schemas/:schema_name/tables/:table_name",
            get(table_volume),
        )
        .route("/connectors/:connector_id/latency", get(connector_latency));

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .merge(api_routes)
        .with_state(state)
}
