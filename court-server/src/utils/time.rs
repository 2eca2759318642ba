//! 时间工具函数
//!
//! Dates travel as `YYYY-MM-DD`, instants as Unix millis. Facility times are
//! wall-clock times stored as UTC.

use chrono::{DateTime, NaiveDate};

use super::{AppError, AppResult};

/// 解析日期字符串 (YYYY-MM-DD)
pub fn parse_date(date: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| AppError::validation(format!("Invalid date format: {}", date)))
}

/// 今天 (UTC)
pub fn today() -> NaiveDate {
    chrono::Utc::now().date_naive()
}

/// 日期开始 (00:00:00) → Unix millis
pub fn day_start_millis(date: NaiveDate) -> i64 {
    date.and_time(chrono::NaiveTime::MIN)
        .and_utc()
        .timestamp_millis()
}

/// 日期结束 → 次日 00:00:00 的 Unix millis
///
/// 返回次日零点时间戳，调用方使用 `< end` (不含) 语义。
pub fn day_end_millis(date: NaiveDate) -> i64 {
    let next_day = date.succ_opt().unwrap_or(date);
    day_start_millis(next_day)
}

/// Unix millis → 日期
pub fn day_of_millis(millis: i64) -> AppResult<NaiveDate> {
    DateTime::from_timestamp_millis(millis)
        .map(|dt| dt.date_naive())
        .ok_or_else(|| AppError::validation(format!("Timestamp out of range: {}", millis)))
}

/// Validate a birth date string against an inclusive-exclusive year window
pub fn validate_birthdate(value: &str, field: &str, from: NaiveDate, to: NaiveDate) -> AppResult<()> {
    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| AppError::validation(format!("{field} must be a YYYY-MM-DD date")))?;
    if date < from || date >= to {
        return Err(AppError::validation(format!(
            "{field} must be between {from} and {to}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2024-05-17").unwrap(),
            NaiveDate::from_ymd_opt(2024, 5, 17).unwrap()
        );
        assert!(parse_date("17/05/2024").is_err());
    }

    #[test]
    fn test_day_bounds() {
        let day = NaiveDate::from_ymd_opt(2024, 5, 17).unwrap();
        assert_eq!(day_end_millis(day) - day_start_millis(day), 86_400_000);
        assert_eq!(day_of_millis(day_start_millis(day)).unwrap(), day);
        assert_eq!(
            day_of_millis(day_end_millis(day) - 1).unwrap(),
            day
        );
    }

    #[test]
    fn test_validate_birthdate() {
        let from = NaiveDate::from_ymd_opt(1960, 1, 1).unwrap();
        let to = NaiveDate::from_ymd_opt(2010, 1, 1).unwrap();
        assert!(validate_birthdate("1985-03-02", "birthdate", from, to).is_ok());
        assert!(validate_birthdate("1959-12-31", "birthdate", from, to).is_err());
        assert!(validate_birthdate("2010-01-01", "birthdate", from, to).is_err());
        assert!(validate_birthdate("1985/03/02", "birthdate", from, to).is_err());
    }
}
