//! Shared state for API handlers

use std::sync::Arc;

use warehouse::{
    LogRecord, LogSource, LookbackWindow, Result, SyncLatencyRecord, WarehouseContext,
    WarehouseError,
};

use crate::{cache::ResultCache, helpers::retain_reportable};

/// Shared state for API handlers: the session's log source and the result
/// caches wrapped around it.
#[derive(Clone)]
pub struct ApiState {
    source: Arc<dyn LogSource>,
    volume_cache: Arc<ResultCache<LookbackWindow, Vec<LogRecord>>>,
    latency_cache: Arc<ResultCache<String, Vec<SyncLatencyRecord>>>,
}

impl std::fmt::Debug for ApiState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiState").field("context", self.context()).finish_non_exhaustive()
    }
}

impl ApiState {
    /// Create a new [`ApiState`] around a connected source.
    pub fn new(source: impl LogSource + 'static) -> Self {
        Self {
            source: Arc::new(source),
            volume_cache: Arc::new(ResultCache::new("volume")),
            latency_cache: Arc::new(ResultCache::new("latency")),
        }
    }

    /// Database and log schema of the session.
    pub fn context(&self) -> &WarehouseContext {
        self.source.context()
    }

    /// Reportable volume records for the window, fetched at most once per
    /// window. Records in the log schema itself are dropped.
    pub async fn volume_records(&self, lookback: LookbackWindow) -> Result<Arc<Vec<LogRecord>>> {
        self.volume_cache
            .get_or_fetch(lookback, || async move {
                let records = self.source.fetch_volume(lookback).await?;
                Ok::<_, WarehouseError>(retain_reportable(records, self.context().schema()))
            })
            .await
    }

    /// Sync latency records of a connector, fetched at most once per
    /// connector. IDs are compared case-insensitively.
    pub async fn latency_records(&self, connector_id: &str) -> Result<Arc<Vec<SyncLatencyRecord>>> {
        let key = connector_id.to_lowercase();
        self.latency_cache
            .get_or_fetch(key.clone(), || async move { self.source.fetch_latency(&key).await })
            .await
    }

    /// Forget every cached result, e.g. after the warehouse data was
    /// reloaded.
    pub fn reset_session(&self) {
        self.volume_cache.clear();
        self.latency_cache.clear();
    }
}
