//! Raw warehouse rows and the domain records built from them.

use chrono::{DateTime, NaiveDate, Utc};
use clickhouse::Row;
use serde::{Deserialize, Serialize};

/// Event type of rows carrying per-table modification counts.
pub const RECORDS_MODIFIED_EVENT: &str = "records_modified";
/// Event type of rows carrying per-sync statistics.
pub const SYNC_STATS_EVENT: &str = "sync_stats";

/// One row of the volume query.
#[derive(Debug, Clone, Row, Serialize, Deserialize, PartialEq, Eq)]
pub struct VolumeRow {
    /// Connector ID
    pub connector_id: String,
    /// Connector type ID
    pub connector_type_id: String,
    /// Vendor name of the connector type
    pub official_connector_name: String,
    /// User-facing connector name
    pub connector_name: String,
    /// Day of the log entry, `YYYY-MM-DD`
    pub date: String,
    /// Log entry timestamp in milliseconds since the epoch
    pub time_stamp: i64,
    /// Destination schema extracted from the payload
    pub schema_name: String,
    /// Destination table extracted from the payload
    pub table_name: String,
    /// Summed modification count
    pub row_volume: u64,
}

/// One row of the latency query.
#[derive(Debug, Clone, Row, Serialize, Deserialize, PartialEq, Eq)]
pub struct LatencyRow {
    /// Sync ID
    pub sync_id: String,
    /// Connector ID
    pub connector_id: String,
    /// Timestamp truncated to the minute, `YYYY-MM-DD HH:MM`
    pub time_stamp: String,
    /// Raw `total_time_s` payload value
    pub latency_seconds: String,
}

/// Row volume written by one connector into one table at one log timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogRecord {
    /// Connector ID
    pub connector_id: String,
    /// Connector type ID
    pub connector_type_id: String,
    /// User-facing connector name
    pub connector_name: String,
    /// Vendor name of the connector type
    pub official_connector_name: String,
    /// Day of the log entry
    pub date: NaiveDate,
    /// Log entry timestamp
    pub time_stamp: DateTime<Utc>,
    /// Destination schema
    pub schema_name: String,
    /// Destination table
    pub table_name: String,
    /// Rows inserted, updated or deleted
    pub row_volume: u64,
    /// English month name of [`Self::date`]
    pub month: &'static str,
}

/// Duration of one sync.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SyncLatencyRecord {
    /// Sync ID
    pub sync_id: String,
    /// Connector ID
    pub connector_id: String,
    /// Timestamp truncated to the minute
    pub time_stamp: String,
    /// Total sync time in seconds, `None` when the payload value is not numeric
    pub latency_seconds: Option<f64>,
}
