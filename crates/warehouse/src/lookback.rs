//! Lookback window for volume queries.

use chrono::NaiveDate;

use crate::error::{Result, WarehouseError};

/// Number of trailing days a volume query covers.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LookbackWindow(u32);

impl LookbackWindow {
    /// Window used when the caller does not pick one.
    pub const DEFAULT: Self = Self(30);

    /// Create a window covering `days` days. Zero is rejected.
    pub fn new(days: u32) -> Result<Self> {
        if days == 0 {
            return Err(WarehouseError::InvalidLookback(days));
        }
        Ok(Self(days))
    }

    /// Length of the window in days.
    pub const fn days(&self) -> u32 {
        self.0
    }

    /// Whether a row stamped on `day` falls inside the window as seen on
    /// `today`. Mirrors `dateDiff('day', toDate(time_stamp), today()) <= days`,
    /// so a row exactly `days` old is included.
    pub fn includes(&self, day: NaiveDate, today: NaiveDate) -> bool {
        (today - day).num_days() <= i64::from(self.0)
    }
}

impl Default for LookbackWindow {
    fn default() -> Self {
        Self::DEFAULT
    }
}
