//! Helper functions for API operations

pub mod aggregation;
pub mod common;
pub mod percentile;

pub use aggregation::*;
pub use common::*;
pub use percentile::*;
