//! Grid Builder

use super::GridError;
use super::hours::{OperatingHours, day_of};
use crate::models::{Court, CourtReservation};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One time slot across all courts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    /// Slot start (millis)
    pub time: i64,
    /// `selected[i]` is true when court `i` is reserved in this slot
    pub selected: Vec<bool>,
}

/// Reservation placed on the grid (row and court indices, `end` inclusive)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridReservation {
    pub start: usize,
    pub end: usize,
    pub court: usize,
}

/// 按场地分组: court index -> start row -> reservation
pub type ReservationGroups = BTreeMap<usize, BTreeMap<usize, GridReservation>>;

/// Empty grid for `day`: one row per slot, every cell free
pub fn create_rows(courts: &[Court], day: NaiveDate, hours: &OperatingHours) -> Vec<Row> {
    (0..hours.row_count())
        .filter_map(|i| hours.slot_time(day, i))
        .map(|time| Row {
            time,
            selected: vec![false; courts.len()],
        })
        .collect()
}

/// Mark rows `start..=end` of `court` as reserved
///
/// Bounds are checked before any cell is touched. Cells already marked stay
/// marked.
pub fn fill_reservation(rows: &mut [Row], reservation: &GridReservation) -> Result<(), GridError> {
    let GridReservation { start, end, court } = *reservation;
    if start > end {
        return Err(GridError::InvertedRange { start, end });
    }
    if end >= rows.len() {
        return Err(GridError::RowOutOfRange {
            row: end,
            rows: rows.len(),
        });
    }
    let courts = rows[start].selected.len();
    if court >= courts {
        return Err(GridError::CourtOutOfRange { court, courts });
    }

    for row in &mut rows[start..=end] {
        row.selected[court] = true;
    }
    Ok(())
}

/// Build the grid for `day` and place every reservation on it
pub fn build_rows(
    courts: &[Court],
    reservations: &[GridReservation],
    day: NaiveDate,
    hours: &OperatingHours,
) -> Result<Vec<Row>, GridError> {
    let mut rows = create_rows(courts, day, hours);
    for reservation in reservations {
        fill_reservation(&mut rows, reservation)?;
    }
    Ok(rows)
}

/// Map a stored reservation onto the grid of `day`
///
/// `Ok(None)` when the reservation starts on another day.
pub fn to_grid_reservation(
    reservation: &CourtReservation,
    courts: &[Court],
    day: NaiveDate,
    hours: &OperatingHours,
) -> Result<Option<GridReservation>, GridError> {
    if day_of(reservation.start) != Some(day) {
        return Ok(None);
    }

    let court = courts
        .iter()
        .position(|c| c.id == reservation.court_id)
        .ok_or(GridError::UnknownCourt(reservation.court_id))?;

    let start = hours
        .slot_index(day, reservation.start)
        .ok_or(GridError::OutsideHours(reservation.id))?;
    if reservation.end <= reservation.start {
        return Err(GridError::InvertedRange { start, end: start });
    }
    // end is exclusive: last covered slot is the one before it
    let end = hours
        .slot_index(day, reservation.end - 1)
        .ok_or(GridError::OutsideHours(reservation.id))?;

    Ok(Some(GridReservation { start, end, court }))
}

/// Group reservations by court, then by start row
pub fn group_rows(reservations: &[GridReservation]) -> ReservationGroups {
    let mut groups = ReservationGroups::new();
    for r in reservations {
        groups.entry(r.court).or_default().insert(r.start, *r);
    }
    groups
}

/// Number of slots a stored reservation covers (cell height)
pub fn slot_span(reservation: &CourtReservation, hours: &OperatingHours) -> i64 {
    let slot = hours.slot_ms();
    if slot == 0 {
        return 0;
    }
    (reservation.end - reservation.start) / slot
}

/// Reservation cell on the scheduler page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledReservation {
    pub id: i64,
    pub court_id: i64,
    pub teacher_id: Option<i64>,
    pub court_index: usize,
    pub start_row: usize,
    pub end_row: usize,
    pub span: i64,
}

/// Scheduler page payload for one day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulerGrid {
    pub date: NaiveDate,
    pub hours: OperatingHours,
    pub courts: Vec<Court>,
    pub rows: Vec<Row>,
    pub reservations: Vec<ScheduledReservation>,
}

/// Build the scheduler payload for `day`
///
/// Reservations from other days are skipped.
pub fn schedule_day(
    courts: Vec<Court>,
    reservations: &[CourtReservation],
    day: NaiveDate,
    hours: &OperatingHours,
) -> Result<SchedulerGrid, GridError> {
    let mut placed = Vec::with_capacity(reservations.len());
    let mut cells = Vec::with_capacity(reservations.len());

    for reservation in reservations {
        let Some(grid) = to_grid_reservation(reservation, &courts, day, hours)? else {
            tracing::debug!(id = reservation.id, "Reservation not on this day, skipped");
            continue;
        };
        cells.push(ScheduledReservation {
            id: reservation.id,
            court_id: reservation.court_id,
            teacher_id: reservation.teacher_id,
            court_index: grid.court,
            start_row: grid.start,
            end_row: grid.end,
            span: slot_span(reservation, hours),
        });
        placed.push(grid);
    }

    let rows = build_rows(&courts, &placed, day, hours)?;

    Ok(SchedulerGrid {
        date: day,
        hours: *hours,
        courts,
        rows,
        reservations: cells,
    })
}
