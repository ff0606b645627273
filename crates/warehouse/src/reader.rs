//! `ClickHouse` reader for connector log analytics.
//! Handles the session probe and the volume and latency queries.

use async_trait::async_trait;
use chrono::Utc;
use clickhouse::{Client, Row, query::Query, sql::Identifier};
use derive_more::Debug;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, error, info, warn};

use crate::{
    context::{ConnectionParams, WarehouseContext},
    error::{Result, WarehouseError},
    lookback::LookbackWindow,
    models::{
        LatencyRow, LogRecord, RECORDS_MODIFIED_EVENT, SYNC_STATS_EVENT, SyncLatencyRecord,
        VolumeRow,
    },
    source::LogSource,
};

#[derive(Row, Deserialize, Serialize)]
struct Probe {
    ok: u8,
}

const PROBE_SQL: &str = "SELECT toUInt8(1) AS ok";

/// Per-table modification counts, joined with connector metadata.
///
/// Binds, in order: log schema, event type, lookback days, log schema (twice,
/// for the metadata tables), excluded schema name. Payloads that are not
/// valid JSON or miss `schema`, `table` or `count` are dropped.
const VOLUME_SQL: &str = "WITH parsed AS ( \
        SELECT connector_id, \
               toString(toDate(time_stamp)) AS date, \
               time_stamp, \
               JSONExtractString(message_data, 'schema') AS schema_name, \
               JSONExtractString(message_data, 'table') AS table_name, \
               JSONExtractUInt(message_data, 'count') AS row_count \
        FROM ?.log \
        WHERE message_event = ? \
          AND dateDiff('day', toDate(time_stamp), today()) <= ? \
          AND isValidJSON(message_data) \
          AND JSONHas(message_data, 'schema') \
          AND JSONHas(message_data, 'table') \
          AND JSONHas(message_data, 'count') \
     ) \
     SELECT c.connector_id AS connector_id, \
            c.connector_type_id AS connector_type_id, \
            ct.official_connector_name AS official_connector_name, \
            c.connector_name AS connector_name, \
            p.date AS date, \
            toUnixTimestamp64Milli(toDateTime64(p.time_stamp, 3)) AS time_stamp, \
            p.schema_name AS schema_name, \
            p.table_name AS table_name, \
            toUInt64(sum(p.row_count)) AS row_volume \
     FROM ?.connector AS c \
     INNER JOIN ?.connector_type AS ct \
       ON c.connector_type_id = ct.id \
     INNER JOIN parsed AS p \
       ON c.connector_id = p.connector_id \
     WHERE p.schema_name != ? \
     GROUP BY c.connector_id, \
              c.connector_type_id, \
              ct.official_connector_name, \
              c.connector_name, \
              p.time_stamp, \
              p.date, \
              p.schema_name, \
              p.table_name \
     ORDER BY p.date DESC";

/// Sync durations of one connector. Binds log schema, event type and the
/// lowercased connector ID.
const LATENCY_SQL: &str = "SELECT sync_id, \
            connector_id, \
            substring(toString(time_stamp), 1, 16) AS time_stamp, \
            JSONExtractRaw(message_data, 'total_time_s') AS latency_seconds \
     FROM ?.log \
     WHERE message_event = ? \
       AND connector_id = ? \
     ORDER BY time_stamp ASC";

/// `ClickHouse` reader client (read-only operations)
#[derive(Clone, Debug)]
pub struct ClickhouseReader {
    /// Base client
    #[debug(skip)]
    base: Client,
    /// Database and log schema of the session
    context: WarehouseContext,
}

impl ClickhouseReader {
    /// Create a reader without contacting the warehouse.
    pub fn new(params: &ConnectionParams) -> Self {
        let mut client = Client::default()
            .with_url(params.account.clone())
            .with_user(params.username.clone())
            .with_password(params.password.clone())
            .with_database(params.database.clone());
        if let Some(role) = params.role.as_deref().filter(|r| !r.is_empty()) {
            client = client.with_option("role", role);
        }
        if let Some(warehouse) = params.warehouse.as_deref().filter(|w| !w.is_empty()) {
            client = client.with_option("workload", warehouse);
        }

        Self { base: client, context: params.context() }
    }

    /// Open a session and verify the warehouse answers.
    ///
    /// Fails with [`WarehouseError::Connection`] on bad credentials or an
    /// unreachable endpoint. No retry is attempted.
    pub async fn connect(params: ConnectionParams) -> Result<Self> {
        let reader = Self::new(&params);
        let start = Instant::now();
        let result = reader.base.query(PROBE_SQL).fetch_all::<Probe>().await;
        let duration_ms = start.elapsed().as_millis();

        match result {
            Ok(_) => {
                info!(
                    url = %params.account,
                    database = params.database,
                    schema = params.schema,
                    duration_ms,
                    "Connected to warehouse"
                );
                Ok(reader)
            }
            Err(source) => {
                error!(url = %params.account, duration_ms, error = %source, "Warehouse connection failed");
                Err(WarehouseError::Connection { url: params.account.to_string(), source })
            }
        }
    }

    /// Context the reader's queries run against.
    pub const fn context(&self) -> &WarehouseContext {
        &self.context
    }

    async fn execute<R>(&self, operation: &'static str, sql: &str, query: Query) -> Result<Vec<R>>
    where
        R: Row + for<'b> Deserialize<'b>,
    {
        let start = Instant::now();

        let result = query.fetch_all::<R>().await;

        let duration_ms = start.elapsed().as_millis();
        match &result {
            Ok(rows) => {
                debug!(query = sql, duration_ms, rows = rows.len(), "ClickHouse query executed")
            }
            Err(e) => error!(query = sql, duration_ms, error = %e, "ClickHouse query failed"),
        }
        result.map_err(|source| WarehouseError::Query { operation, source })
    }

    /// Bound volume query for the trailing `lookback` window.
    pub fn volume_query(&self, lookback: LookbackWindow) -> Query {
        let schema = self.context.schema();
        self.base
            .query(VOLUME_SQL)
            .bind(Identifier(schema))
            .bind(RECORDS_MODIFIED_EVENT)
            .bind(lookback.days())
            .bind(Identifier(schema))
            .bind(Identifier(schema))
            .bind(schema)
    }

    /// Bound latency query for one connector. The ID is lowercased first.
    pub fn latency_query(&self, connector_id: &str) -> Query {
        self.base
            .query(LATENCY_SQL)
            .bind(Identifier(self.context.schema()))
            .bind(SYNC_STATS_EVENT)
            .bind(connector_id.to_lowercase())
    }

    /// Get volume records of every connector for the trailing window,
    /// newest day first.
    pub async fn get_volume_records(&self, lookback: LookbackWindow) -> Result<Vec<LogRecord>> {
        let rows = self
            .execute::<VolumeRow>("volume query", VOLUME_SQL, self.volume_query(lookback))
            .await?;
        let records = rows.into_iter().map(LogRecord::try_from).collect::<Result<Vec<_>>>()?;

        let today = Utc::now().date_naive();
        let outside = records.iter().filter(|r| !lookback.includes(r.date, today)).count();
        if outside > 0 {
            warn!(outside, days = lookback.days(), "Volume rows fall outside the lookback window");
        }
        Ok(records)
    }

    /// Get sync latency records of one connector, oldest first.
    pub async fn get_sync_latencies(&self, connector_id: &str) -> Result<Vec<SyncLatencyRecord>> {
        let rows = self
            .execute::<LatencyRow>("latency query", LATENCY_SQL, self.latency_query(connector_id))
            .await?;
        Ok(rows.into_iter().map(SyncLatencyRecord::from).collect())
    }
}

#[async_trait]
impl LogSource for ClickhouseReader {
    fn context(&self) -> &WarehouseContext {
        &self.context
    }

    async fn fetch_volume(&self, lookback: LookbackWindow) -> Result<Vec<LogRecord>> {
        self.get_volume_records(lookback).await
    }

    async fn fetch_latency(&self, connector_id: &str) -> Result<Vec<SyncLatencyRecord>> {
        self.get_sync_latencies(connector_id).await
    }
}
