//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category classification based on error code ranges
///
/// Categories are determined by the leading digit of the error code:
/// - 0xxx: General errors
/// - 1xxx: Court errors
/// - 2xxx: Reservation errors
/// - 3xxx: Pricing errors
/// - 4xxx: People errors
/// - 5xxx..9xxx: System errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General errors (0xxx)
    General,
    /// Court errors (1xxx)
    Court,
    /// Reservation errors (2xxx)
    Reservation,
    /// Pricing errors (3xxx)
    Pricing,
    /// Client / employee errors (4xxx)
    People,
    /// System errors (9xxx)
    System,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub fn from_code(code: u16) -> Self {
        match code {
            0..1000 => Self::General,
            1000..2000 => Self::Court,
            2000..3000 => Self::Reservation,
            3000..4000 => Self::Pricing,
            4000..5000 => Self::People,
            _ => Self::System,
        }
    }

    /// Get the string name for this category
    pub fn name(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Court => "court",
            Self::Reservation => "reservation",
            Self::Pricing => "pricing",
            Self::People => "people",
            Self::System => "system",
        }
    }
}

impl ErrorCode {
    /// Get the category for this error code
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_code() {
        assert_eq!(ErrorCategory::from_code(0), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(999), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(1001), ErrorCategory::Court);
        assert_eq!(ErrorCategory::from_code(2002), ErrorCategory::Reservation);
        assert_eq!(ErrorCategory::from_code(3001), ErrorCategory::Pricing);
        assert_eq!(ErrorCategory::from_code(4002), ErrorCategory::People);
        assert_eq!(ErrorCategory::from_code(9001), ErrorCategory::System);
        assert_eq!(ErrorCategory::from_code(10000), ErrorCategory::System);
    }

    #[test]
    fn test_error_code_category() {
        assert_eq!(ErrorCode::Success.category(), ErrorCategory::General);
        assert_eq!(ErrorCode::CourtNotFound.category(), ErrorCategory::Court);
        assert_eq!(
            ErrorCode::ReservationOverlap.category(),
            ErrorCategory::Reservation
        );
        assert_eq!(ErrorCode::DiscountNotFound.category(), ErrorCategory::Pricing);
        assert_eq!(ErrorCode::TeacherRequired.category(), ErrorCategory::People);
        assert_eq!(ErrorCode::DatabaseError.category(), ErrorCategory::System);
    }

    #[test]
    fn test_category_serialize() {
        let json = serde_json::to_string(&ErrorCategory::Reservation).unwrap();
        assert_eq!(json, "\"reservation\"");
    }
}
