//! Error taxonomy for warehouse access.

use thiserror::Error;

/// Result alias for warehouse operations.
pub type Result<T, E = WarehouseError> = std::result::Result<T, E>;

/// Failures surfaced by the warehouse reader.
///
/// None of these are retried. Each one is terminal for the interaction that
/// triggered it.
#[derive(Debug, Error)]
pub enum WarehouseError {
    /// Bad credentials or an unreachable warehouse.
    #[error("failed to connect to warehouse at {url}: {source}")]
    Connection {
        /// Warehouse endpoint that was probed
        url: String,
        /// Underlying client error
        #[source]
        source: clickhouse::error::Error,
    },
    /// Malformed query or backend error, reported as-is.
    #[error("{operation} failed: {source}")]
    Query {
        /// Short description of the query that failed
        operation: &'static str,
        /// Underlying client error
        #[source]
        source: clickhouse::error::Error,
    },
    /// A returned row did not have the expected shape.
    #[error("unexpected {field} in {operation} result: {value:?}")]
    DataShape {
        /// Query that produced the row
        operation: &'static str,
        /// Offending column
        field: &'static str,
        /// Raw value as returned by the warehouse
        value: String,
    },
    /// Lookback windows must cover at least one day.
    #[error("lookback window must be a positive number of days, got {0}")]
    InvalidLookback(u32),
}

impl WarehouseError {
    /// Whether the error originates from the request parameters rather than
    /// the warehouse.
    pub const fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidLookback(_))
    }
}
