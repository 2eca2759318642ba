//! Scheduler Grid
//!
//! 场地 × 时间段 网格:
//! - [`OperatingHours`]: opening window and slot length
//! - [`build_rows`]: empty rows + reservation cells
//! - [`schedule_day`]: full payload for the scheduler page

mod grid;
mod hours;


pub use grid::*;
pub use hours::OperatingHours;

use thiserror::Error;

/// Grid construction errors
///
/// Every variant is a caller contract violation; the grid is never clamped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("court index {court} out of range ({courts} courts)")]
    CourtOutOfRange { court: usize, courts: usize },

    #[error("row index {row} out of range ({rows} rows)")]
    RowOutOfRange { row: usize, rows: usize },

    #[error("reservation starts at row {start} after it ends at row {end}")]
    InvertedRange { start: usize, end: usize },

    #[error("court {0} is not part of the grid")]
    UnknownCourt(i64),

    #[error("reservation {0} is outside operating hours")]
    OutsideHours(i64),

    #[error("invalid operating hours: {0}")]
    InvalidHours(String),
}
