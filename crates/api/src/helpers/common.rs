//! Common helper functions used across API endpoints

use crate::ErrorResponse;
use warehouse::WarehouseError;

/// Map a warehouse failure to an error response, logging it.
pub fn warehouse_error(operation: &str, error: &WarehouseError) -> ErrorResponse {
    if error.is_invalid_input() {
        tracing::warn!(operation = operation, error = %error, "Rejected request parameters");
        return ErrorResponse::invalid_params(error.to_string());
    }
    tracing::error!(operation = operation, error = %error, "Warehouse operation failed");
    ErrorResponse::database_error()
}

/// Response for a connector with no records in the window.
pub fn unknown_connector(connector_id: &str, lookback_days: u32) -> ErrorResponse {
    tracing::warn!(connector_id, lookback_days, "Unknown connector requested");
    ErrorResponse::not_found(format!(
        "connector {connector_id} has no activity in the last {lookback_days} days"
    ))
}
