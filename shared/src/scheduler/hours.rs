//! Operating hours and slot arithmetic
//!
//! Facility times are naive wall-clock times stored as UTC millis.

use super::GridError;
use chrono::{DateTime, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

const MS_PER_MINUTE: i64 = 60_000;

/// Opening window of the facility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatingHours {
    /// First slot starts at this hour
    pub open_hour: u32,
    /// Last slot ends at this hour
    pub close_hour: u32,
    pub slot_minutes: u32,
}

impl Default for OperatingHours {
    fn default() -> Self {
        Self {
            open_hour: 7,
            close_hour: 22,
            slot_minutes: 30,
        }
    }
}

impl OperatingHours {
    /// Checked constructor: the window must be non-empty, end by midnight
    /// and divide evenly into slots.
    pub fn new(open_hour: u32, close_hour: u32, slot_minutes: u32) -> Result<Self, GridError> {
        if open_hour >= close_hour || close_hour > 24 {
            return Err(GridError::InvalidHours(format!(
                "open hour {} must be before close hour {} (max 24)",
                open_hour, close_hour
            )));
        }
        if slot_minutes == 0 || ((close_hour - open_hour) * 60) % slot_minutes != 0 {
            return Err(GridError::InvalidHours(format!(
                "{} minute slots do not divide {}:00-{}:00",
                slot_minutes, open_hour, close_hour
            )));
        }
        Ok(Self {
            open_hour,
            close_hour,
            slot_minutes,
        })
    }

    /// Number of rows in a day's grid
    pub fn row_count(&self) -> usize {
        let minutes = self.close_hour.saturating_sub(self.open_hour) * 60;
        match self.slot_minutes {
            0 => 0,
            slot => (minutes / slot) as usize,
        }
    }

    /// Slot length in millis
    pub fn slot_ms(&self) -> i64 {
        i64::from(self.slot_minutes) * MS_PER_MINUTE
    }

    /// Opening time of `day` (millis)
    pub fn opening(&self, day: NaiveDate) -> i64 {
        day_start(day) + i64::from(self.open_hour) * 60 * MS_PER_MINUTE
    }

    /// Closing time of `day` (millis, exclusive)
    pub fn closing(&self, day: NaiveDate) -> i64 {
        day_start(day) + i64::from(self.close_hour) * 60 * MS_PER_MINUTE
    }

    /// Start time of row `index`, `None` past the last row
    pub fn slot_time(&self, day: NaiveDate, index: usize) -> Option<i64> {
        (index < self.row_count()).then(|| self.opening(day) + index as i64 * self.slot_ms())
    }

    /// Row containing `time`, `None` outside the window of `day`
    pub fn slot_index(&self, day: NaiveDate, time: i64) -> Option<usize> {
        if time < self.opening(day) || time >= self.closing(day) || self.slot_ms() == 0 {
            return None;
        }
        Some(((time - self.opening(day)) / self.slot_ms()) as usize)
    }

    /// Whether `time` falls on a slot boundary of its day
    ///
    /// Boundaries are counted from the day's opening time. With a 24:00
    /// close, midnight is measured as the previous day's closing.
    pub fn is_aligned(&self, time: i64) -> bool {
        let slot = self.slot_ms();
        if slot <= 0 {
            return false;
        }
        let Some(mut day) = day_of(time) else {
            return false;
        };
        if self.close_hour == 24 && time == day_start(day) {
            match day.pred_opt() {
                Some(prev) => day = prev,
                None => return false,
            }
        }
        (time - self.opening(day)).rem_euclid(slot) == 0
    }
}

/// Midnight of `day` in millis
pub(crate) fn day_start(day: NaiveDate) -> i64 {
    day.and_time(NaiveTime::MIN).and_utc().timestamp_millis()
}

/// Calendar day of a millis timestamp
pub(crate) fn day_of(time: i64) -> Option<NaiveDate> {
    DateTime::from_timestamp_millis(time).map(|dt| dt.date_naive())
}
