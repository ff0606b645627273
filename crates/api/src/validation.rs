//! Validation functions for API query parameters

use crate::ErrorResponse;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use warehouse::LookbackWindow;

/// Lookback window parameter shared by the volume endpoints
#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LookbackQuery {
    /// Number of trailing days to report on (defaults to 30)
    pub days: Option<u32>,
}

/// Resolve the requested lookback window. Any positive day count is
/// accepted; zero is rejected.
pub fn resolve_lookback(params: &LookbackQuery) -> Result<LookbackWindow, ErrorResponse> {
    let Some(days) = params.days else {
        return Ok(LookbackWindow::DEFAULT);
    };
    LookbackWindow::new(days).map_err(|e| ErrorResponse::invalid_params(e.to_string()))
}
