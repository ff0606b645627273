//! Row to record conversions and value coercion.

use crate::{
    error::WarehouseError,
    models::{LatencyRow, LogRecord, SyncLatencyRecord, VolumeRow},
};

use chrono::{Datelike, LocalResult, NaiveDate, TimeZone, Utc};
use std::convert::TryFrom;

/// English month names in calendar order.
pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Month name of `date`. The year is deliberately not part of it.
pub fn month_name(date: NaiveDate) -> &'static str {
    MONTH_NAMES[date.month0() as usize]
}

/// Position of a month name in the calendar, used to order rollups.
/// Unknown names sort last.
pub fn month_index(name: &str) -> usize {
    MONTH_NAMES.iter().position(|m| *m == name).unwrap_or(MONTH_NAMES.len())
}

/// Coerce a raw `total_time_s` value into seconds.
///
/// Accepts bare and quoted JSON numbers. Anything else, including `null`,
/// empty strings and non-finite values, yields `None`.
pub fn coerce_latency(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    let unquoted = trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(trimmed)
        .trim();
    unquoted.parse::<f64>().ok().filter(|v| v.is_finite())
}

// Conversion from VolumeRow to LogRecord
impl TryFrom<VolumeRow> for LogRecord {
    type Error = WarehouseError;

    fn try_from(row: VolumeRow) -> Result<Self, Self::Error> {
        let date = NaiveDate::parse_from_str(row.date.trim_matches('"'), "%Y-%m-%d").map_err(
            |_| WarehouseError::DataShape {
                operation: "volume query",
                field: "date",
                value: row.date.clone(),
            },
        )?;
        let time_stamp = match Utc.timestamp_millis_opt(row.time_stamp) {
            LocalResult::Single(ts) => ts,
            _ => {
                return Err(WarehouseError::DataShape {
                    operation: "volume query",
                    field: "time_stamp",
                    value: row.time_stamp.to_string(),
                });
            }
        };

        Ok(Self {
            connector_id: row.connector_id,
            connector_type_id: row.connector_type_id,
            connector_name: row.connector_name,
            official_connector_name: row.official_connector_name,
            date,
            time_stamp,
            schema_name: row.schema_name,
            table_name: row.table_name,
            row_volume: row.row_volume,
            month: month_name(date),
        })
    }
}

// Conversion from LatencyRow to SyncLatencyRecord
impl From<LatencyRow> for SyncLatencyRecord {
    fn from(row: LatencyRow) -> Self {
        Self {
            latency_seconds: coerce_latency(&row.latency_seconds),
            sync_id: row.sync_id,
            connector_id: row.connector_id,
            time_stamp: row.time_stamp,
        }
    }
}
