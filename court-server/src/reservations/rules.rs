//! Reservation rules

use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{CourtReservation, CourtReservationCreate, CourtReservationUpdate};
use shared::scheduler::OperatingHours;
use sqlx::SqlitePool;

use crate::db::repository::{court, court_reservation, employee};
use crate::utils::time::day_of_millis;
use crate::utils::validation::{MAX_NOTE_LEN, validate_optional_text};

/// Check that `[start, end)` is a non-empty run of whole slots within one
/// day's opening hours.
pub fn validate_window(hours: &OperatingHours, start: i64, end: i64) -> AppResult<()> {
    if end <= start {
        return Err(AppError::validation("Reservation end must be after its start")
            .with_detail("start", start)
            .with_detail("end", end));
    }
    if !hours.is_aligned(start) || !hours.is_aligned(end) {
        return Err(AppError::new(ErrorCode::ReservationMisaligned)
            .with_detail("slot_minutes", hours.slot_minutes));
    }
    let day = day_of_millis(start)?;
    if start < hours.opening(day) || end > hours.closing(day) {
        return Err(AppError::new(ErrorCode::ReservationOutsideHours)
            .with_detail("open_hour", hours.open_hour)
            .with_detail("close_hour", hours.close_hour));
    }
    Ok(())
}

/// `teacher_id` must name an employee flagged as teacher
pub(crate) async fn ensure_teacher(pool: &SqlitePool, teacher_id: Option<i64>) -> AppResult<()> {
    let Some(id) = teacher_id else {
        return Ok(());
    };
    let teacher = employee::find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::EmployeeNotFound).with_detail("id", id))?;
    if !teacher.is_teacher {
        return Err(AppError::new(ErrorCode::TeacherRequired).with_detail("id", id));
    }
    Ok(())
}

async fn ensure_court(pool: &SqlitePool, court_id: i64) -> AppResult<()> {
    if court::find_by_id(pool, court_id).await?.is_none() {
        return Err(AppError::new(ErrorCode::CourtNotFound).with_detail("id", court_id));
    }
    Ok(())
}

/// Create a court reservation after checking hours, court and teacher
pub async fn create_reservation(
    pool: &SqlitePool,
    hours: &OperatingHours,
    data: CourtReservationCreate,
) -> AppResult<CourtReservation> {
    validate_window(hours, data.start, data.end)?;
    validate_optional_text(&data.note, "note", MAX_NOTE_LEN)?;
    ensure_court(pool, data.court_id).await?;
    ensure_teacher(pool, data.teacher_id).await?;

    let reservation = court_reservation::create(pool, data).await?;
    tracing::info!(
        id = reservation.id,
        court_id = reservation.court_id,
        start = reservation.start,
        end = reservation.end,
        "Court reservation created"
    );
    Ok(reservation)
}

/// Update a court reservation; the merged window is validated again
pub async fn update_reservation(
    pool: &SqlitePool,
    hours: &OperatingHours,
    id: i64,
    data: CourtReservationUpdate,
) -> AppResult<CourtReservation> {
    let current = court_reservation::find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::ReservationNotFound).with_detail("id", id))?;

    let start = data.start.unwrap_or(current.start);
    let end = data.end.unwrap_or(current.end);
    validate_window(hours, start, end)?;
    if let Some(note) = &data.note {
        validate_optional_text(note, "note", MAX_NOTE_LEN)?;
    }
    if let Some(court_id) = data.court_id {
        ensure_court(pool, court_id).await?;
    }
    ensure_teacher(pool, data.teacher_id.flatten()).await?;

    Ok(court_reservation::update(pool, id, data).await?)
}

/// Remove a court reservation with its item reservations and transactions
pub async fn remove_reservation(pool: &SqlitePool, id: i64) -> AppResult<bool> {
    let removed = court_reservation::delete_cascade(pool, id).await?;
    if !removed {
        return Err(AppError::new(ErrorCode::ReservationNotFound).with_detail("id", id));
    }
    tracing::info!(id, "Court reservation removed");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const HALF_HOUR: i64 = 30 * 60_000;

    fn opening() -> i64 {
        let day = NaiveDate::from_ymd_opt(2024, 5, 17).unwrap();
        OperatingHours::default().opening(day)
    }

    #[test]
    fn test_window_accepts_whole_slots() {
        let hours = OperatingHours::default();
        let open = opening();
        assert!(validate_window(&hours, open, open + HALF_HOUR).is_ok());
        assert!(validate_window(&hours, open + 27 * HALF_HOUR, open + 30 * HALF_HOUR).is_ok());
    }

    #[test]
    fn test_window_rejects_empty_range() {
        let hours = OperatingHours::default();
        let err = validate_window(&hours, opening(), opening()).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[test]
    fn test_window_rejects_misaligned() {
        let hours = OperatingHours::default();
        let open = opening();
        let err = validate_window(&hours, open + 60_000, open + HALF_HOUR).unwrap_err();
        assert_eq!(err.code, ErrorCode::ReservationMisaligned);
    }

    #[test]
    fn test_window_uses_slots_from_opening() {
        let hours = OperatingHours::new(7, 22, 45).unwrap();
        let open = opening();
        let slot = 45 * 60_000;

        assert!(validate_window(&hours, open, open + slot).is_ok());
        assert!(validate_window(&hours, open + slot, open + 3 * slot).is_ok());

        let err = validate_window(&hours, open + HALF_HOUR, open + slot).unwrap_err();
        assert_eq!(err.code, ErrorCode::ReservationMisaligned);
    }

    #[test]
    fn test_window_rejects_outside_hours() {
        let hours = OperatingHours::default();
        let open = opening();
        let err = validate_window(&hours, open - HALF_HOUR, open + HALF_HOUR).unwrap_err();
        assert_eq!(err.code, ErrorCode::ReservationOutsideHours);

        let err = validate_window(&hours, open + 29 * HALF_HOUR, open + 31 * HALF_HOUR).unwrap_err();
        assert_eq!(err.code, ErrorCode::ReservationOutsideHours);
    }
}
