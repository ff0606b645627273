//! Warehouse access for connector sync analytics.
//!
//! Builds bound queries over the connector log table, executes them through
//! the `ClickHouse` client and converts the rows into domain records.

pub mod context;
pub mod conversions;
pub mod error;
pub mod lookback;
pub mod models;
pub mod reader;
pub mod source;

pub use context::{ConnectionParams, WarehouseContext};
pub use conversions::{MONTH_NAMES, coerce_latency, month_index, month_name};
pub use error::{Result, WarehouseError};
pub use lookback::LookbackWindow;
pub use models::{LatencyRow, LogRecord, SyncLatencyRecord, VolumeRow};
pub use reader::ClickhouseReader;
pub use source::LogSource;
