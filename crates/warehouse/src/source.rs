//! Query execution seam between the reader and its consumers.

use async_trait::async_trait;
use std::sync::Arc;

use crate::{
    context::WarehouseContext,
    error::Result,
    lookback::LookbackWindow,
    models::{LogRecord, SyncLatencyRecord},
};

/// Source of connector log data.
///
/// Every call is one warehouse round trip. Implementations do not cache.
#[async_trait]
pub trait LogSource: Send + Sync {
    /// Context the source's queries run against.
    fn context(&self) -> &WarehouseContext;

    /// Volume records for the trailing `lookback` window.
    async fn fetch_volume(&self, lookback: LookbackWindow) -> Result<Vec<LogRecord>>;

    /// Sync latency records for one connector.
    async fn fetch_latency(&self, connector_id: &str) -> Result<Vec<SyncLatencyRecord>>;
}

#[async_trait]
impl<T: LogSource + ?Sized> LogSource for Arc<T> {
    fn context(&self) -> &WarehouseContext {
        (**self).context()
    }

    async fn fetch_volume(&self, lookback: LookbackWindow) -> Result<Vec<LogRecord>> {
        (**self).fetch_volume(lookback).await
    }

    async fn fetch_latency(&self, connector_id: &str) -> Result<Vec<SyncLatencyRecord>> {
        (**self).fetch_latency(connector_id).await
    }
}
