//! Helper utilities to launch the Syncscope API server.

use std::{net::SocketAddr, sync::Arc};

use api::ApiState;
use api_types::HealthResponse;
use axum::{
    Json, Router,
    http::{HeaderValue, Method},
    routing::get,
};
use eyre::Result;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{Level, info};
use warehouse::LogSource;

/// Version prefix for all API routes.
pub const API_VERSION: &str = "v1";

/// Health check handler returning `{ "status": "ok" }`.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok".to_owned() })
}

/// Build the API router with CORS and tracing layers.
pub fn router(state: ApiState, allowed_origins: Vec<String>) -> Router {
    let allowed = Arc::new(allowed_origins);
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::predicate({
            let allowed = Arc::clone(&allowed);
            move |origin: &HeaderValue, _| match origin.to_str() {
                Ok(origin) => {
                    allowed.iter().any(|o| o == origin)
                        || origin.starts_with("http://localhost:")
                        || origin.starts_with("http://127.0.0.1:")
                }
                Err(_) => false,
            }
        }))
        .allow_methods([Method::GET])
        .allow_headers(Any)
        .expose_headers(Any);
    let trace = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_request(DefaultOnRequest::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .route("/health", get(health))
        .nest(&format!("/{API_VERSION}"), api::router(state))
        .layer(cors)
        .layer(trace)
}

/// Run the API server on the given address.
pub async fn run(
    addr: SocketAddr,
    source: impl LogSource + 'static,
    allowed_origins: Vec<String>,
) -> Result<()> {
    let state = ApiState::new(source);
    let app = router(state, allowed_origins);

    info!("Starting API server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>()).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::{
        body::{self, Body},
        http::{Request, StatusCode},
    };
    use chrono::{TimeZone, Utc};
    use serde_json::Value;
    use tower::util::ServiceExt;
    use warehouse::{LogRecord, LookbackWindow, SyncLatencyRecord, WarehouseContext};

    struct StaticSource {
        context: WarehouseContext,
        records: Vec<LogRecord>,
    }

    #[async_trait]
    impl LogSource for StaticSource {
        fn context(&self) -> &WarehouseContext {
            &self.context
        }

        async fn fetch_volume(
            &self,
            _lookback: LookbackWindow,
        ) -> warehouse::Result<Vec<LogRecord>> {
            Ok(self.records.clone())
        }

        async fn fetch_latency(
            &self,
            _connector_id: &str,
        ) -> warehouse::Result<Vec<SyncLatencyRecord>> {
            Ok(Vec::new())
        }
    }

    fn record(connector_id: &str, schema: &str, volume: u64) -> LogRecord {
        let date = chrono::NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        LogRecord {
            connector_id: connector_id.to_owned(),
            connector_type_id: "postgres".to_owned(),
            official_connector_name: "PostgreSQL".to_owned(),
            connector_name: connector_id.to_owned(),
            date,
            time_stamp: Utc.with_ymd_and_hms(2024, 1, 15, 8, 0, 0).unwrap(),
            schema_name: schema.to_owned(),
            table_name: "orders".to_owned(),
            row_volume: volume,
            month: "January",
        }
    }

    fn build_app(allowed: Vec<String>) -> Router {
        let source = StaticSource {
            context: WarehouseContext::new("default".to_owned(), "fivetran_log".to_owned()),
            records: vec![record("warm_up", "sales", 10), record("warm_up", "fivetran_log", 99)],
        };
        router(ApiState::new(source), allowed)
    }

    fn default_origins() -> Vec<String> {
        config::DEFAULT_ALLOWED_ORIGINS.split(',').map(|s| s.to_owned()).collect()
    }

    async fn send_request(
        app: Router,
        uri: &str,
        origin: &str,
    ) -> (StatusCode, Value, Option<String>) {
        let response = app
            .oneshot(
                Request::builder().uri(uri).header("Origin", origin).body(Body::empty()).unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let cors = response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok())
            .map(ToOwned::to_owned);
        let bytes = body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        (status, body, cors)
    }

    #[tokio::test]
    async fn health_is_unversioned() {
        let (status, body, _) =
            send_request(build_app(default_origins()), "/health", "http://localhost:5173").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn serves_monthly_volume_under_version_prefix() {
        let uri = format!("/{API_VERSION}/volume/monthly");
        let (status, body, cors) =
            send_request(build_app(default_origins()), &uri, "https://syncscope.dev").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["lookback_days"], 30);
        assert_eq!(body["rows"][0]["month"], "January");
        assert_eq!(body["rows"][0]["row_volume"], 10);
        assert_eq!(cors.as_deref(), Some("https://syncscope.dev"));
    }

    #[tokio::test]
    async fn rejects_zero_lookback() {
        let uri = format!("/{API_VERSION}/connectors?days=0");
        let (status, body, _) =
            send_request(build_app(default_origins()), &uri, "http://localhost:5173").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["type"], "invalid-params");
    }

    #[tokio::test]
    async fn unknown_connector_is_not_found() {
        let uri = format!("/{API_VERSION}/connectors/missing/volume");
        let (status, body, _) =
            send_request(build_app(default_origins()), &uri, "http://localhost:5173").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["type"], "not-found");
    }

    #[tokio::test]
    async fn latency_without_syncs_has_no_percentiles() {
        let uri = format!("/{API_VERSION}/connectors/warm_up/latency");
        let (status, body, _) =
            send_request(build_app(default_origins()), &uri, "http://localhost:5173").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["connector_id"], "warm_up");
        assert!(body["percentiles"].is_null());
        assert_eq!(body["series"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn allows_extra_origin() {
        let mut origins = default_origins();
        origins.push("https://example.com".to_owned());
        let (status, _, cors) =
            send_request(build_app(origins), "/health", "https://example.com").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(cors.as_deref(), Some("https://example.com"));
    }

    #[tokio::test]
    async fn allows_127_0_0_1_origin() {
        let (status, _, cors) =
            send_request(build_app(default_origins()), "/health", "http://127.0.0.1:3001").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(cors.as_deref(), Some("http://127.0.0.1:3001"));
    }

    #[tokio::test]
    async fn denies_other_origin() {
        let (status, _, cors) =
            send_request(build_app(default_origins()), "/health", "https://notallowed.com").await;
        assert_eq!(status, StatusCode::OK);
        assert!(cors.is_none());
    }
}
