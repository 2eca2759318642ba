//! Unified error codes for the court reservation service
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Court errors
//! - 2xxx: Reservation errors
//! - 3xxx: Pricing errors (prices, discounts, items, transactions)
//! - 4xxx: People errors (clients, employees)
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 1xxx: Court ====================
    /// Court not found
    CourtNotFound = 1001,
    /// Court still has reservations
    CourtHasReservations = 1002,

    // ==================== 2xxx: Reservation ====================
    /// Court reservation not found
    ReservationNotFound = 2001,
    /// Reservation overlaps an existing one on the same court
    ReservationOverlap = 2002,
    /// Reservation outside operating hours
    ReservationOutsideHours = 2003,
    /// Reservation not aligned to the slot grid
    ReservationMisaligned = 2004,
    /// Item reservation not found
    ItemReservationNotFound = 2005,
    /// Reservation already has a transaction
    ReservationAlreadyCheckedOut = 2006,

    // ==================== 3xxx: Pricing ====================
    /// Price not found
    PriceNotFound = 3001,
    /// Discount not found
    DiscountNotFound = 3002,
    /// Price used for the wrong kind of line (item vs. service)
    PriceKindMismatch = 3003,
    /// Item not found
    ItemNotFound = 3004,
    /// Price is referenced by transactions
    PriceInUse = 3005,
    /// Transaction not found
    TransactionNotFound = 3006,

    // ==================== 4xxx: People ====================
    /// Client not found
    ClientNotFound = 4001,
    /// Employee not found
    EmployeeNotFound = 4002,
    /// Employee is not a teacher
    TeacherRequired = 4003,
    /// Client is referenced by transactions
    ClientInUse = 4004,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Configuration error
    ConfigError = 9003,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Court
            ErrorCode::CourtNotFound => "Court not found",
            ErrorCode::CourtHasReservations => "Court has associated reservations",

            // Reservation
            ErrorCode::ReservationNotFound => "Reservation not found",
            ErrorCode::ReservationOverlap => "Court is already reserved at this time",
            ErrorCode::ReservationOutsideHours => "Reservation is outside operating hours",
            ErrorCode::ReservationMisaligned => "Reservation must start and end on a slot boundary",
            ErrorCode::ItemReservationNotFound => "Item reservation not found",
            ErrorCode::ReservationAlreadyCheckedOut => "Reservation already has a transaction",

            // Pricing
            ErrorCode::PriceNotFound => "Price not found",
            ErrorCode::DiscountNotFound => "Discount not found",
            ErrorCode::PriceKindMismatch => "Price cannot be used for this kind of line",
            ErrorCode::ItemNotFound => "Item not found",
            ErrorCode::PriceInUse => "Price is referenced by transactions",
            ErrorCode::TransactionNotFound => "Transaction not found",

            // People
            ErrorCode::ClientNotFound => "Client not found",
            ErrorCode::EmployeeNotFound => "Employee not found",
            ErrorCode::TeacherRequired => "Employee is not a teacher",
            ErrorCode::ClientInUse => "Client is referenced by transactions",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Court
            1001 => Ok(ErrorCode::CourtNotFound),
            1002 => Ok(ErrorCode::CourtHasReservations),

            // Reservation
            2001 => Ok(ErrorCode::ReservationNotFound),
            2002 => Ok(ErrorCode::ReservationOverlap),
            2003 => Ok(ErrorCode::ReservationOutsideHours),
            2004 => Ok(ErrorCode::ReservationMisaligned),
            2005 => Ok(ErrorCode::ItemReservationNotFound),
            2006 => Ok(ErrorCode::ReservationAlreadyCheckedOut),

            // Pricing
            3001 => Ok(ErrorCode::PriceNotFound),
            3002 => Ok(ErrorCode::DiscountNotFound),
            3003 => Ok(ErrorCode::PriceKindMismatch),
            3004 => Ok(ErrorCode::ItemNotFound),
            3005 => Ok(ErrorCode::PriceInUse),
            3006 => Ok(ErrorCode::TransactionNotFound),

            // People
            4001 => Ok(ErrorCode::ClientNotFound),
            4002 => Ok(ErrorCode::EmployeeNotFound),
            4003 => Ok(ErrorCode::TeacherRequired),
            4004 => Ok(ErrorCode::ClientInUse),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9003 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::ValidationFailed.code(), 2);
        assert_eq!(ErrorCode::NotFound.code(), 3);

        assert_eq!(ErrorCode::CourtNotFound.code(), 1001);
        assert_eq!(ErrorCode::ReservationOverlap.code(), 2002);
        assert_eq!(ErrorCode::PriceKindMismatch.code(), 3003);
        assert_eq!(ErrorCode::TeacherRequired.code(), 4003);
        assert_eq!(ErrorCode::DatabaseError.code(), 9002);
    }

    #[test]
    fn test_serialize() {
        let json = serde_json::to_string(&ErrorCode::NotFound).unwrap();
        assert_eq!(json, "3");

        let json = serde_json::to_string(&ErrorCode::ReservationNotFound).unwrap();
        assert_eq!(json, "2001");
    }

    #[test]
    fn test_deserialize() {
        let code: ErrorCode = serde_json::from_str("2002").unwrap();
        assert_eq!(code, ErrorCode::ReservationOverlap);

        let code: ErrorCode = serde_json::from_str("9001").unwrap();
        assert_eq!(code, ErrorCode::InternalError);
    }

    #[test]
    fn test_deserialize_invalid() {
        let result: Result<ErrorCode, _> = serde_json::from_str("999");
        assert!(result.is_err());

        let result: Result<ErrorCode, _> = serde_json::from_str("10000");
        assert!(result.is_err());
    }

    #[test]
    fn test_every_code_survives_try_from() {
        let codes = [
            ErrorCode::Success,
            ErrorCode::CourtHasReservations,
            ErrorCode::ReservationAlreadyCheckedOut,
            ErrorCode::TransactionNotFound,
            ErrorCode::ClientInUse,
            ErrorCode::ConfigError,
        ];

        for code in codes {
            assert_eq!(ErrorCode::try_from(code.code()), Ok(code));
        }
    }

    #[test]
    fn test_message() {
        assert_eq!(ErrorCode::NotFound.message(), "Resource not found");
        assert_eq!(
            ErrorCode::ReservationOverlap.message(),
            "Court is already reserved at this time"
        );
    }

    #[test]
    fn test_invalid_error_code_display() {
        let err = InvalidErrorCode(999);
        assert_eq!(format!("{}", err), "invalid error code: 999");
    }
}
