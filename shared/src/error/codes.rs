//! Unified error codes for the Fiesta client
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication / profile errors
//! - 4xxx: Reservation errors
//! - 9xxx: System errors

use http::StatusCode;
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

    // ==================== 1xxx: Auth / Profile ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials
    InvalidCredentials = 1002,
    /// Session has expired
    SessionExpired = 1003,
    /// Token has expired
    TokenExpired = 1004,
    /// Profile not found for the authenticated user
    ProfileNotFound = 1101,

    // ==================== 4xxx: Reservation ====================
    /// Reservation not found
    ReservationNotFound = 4001,
    /// Reservation is no longer pending
    ReservationNotPending = 4002,
    /// Reservation has already been canceled
    ReservationAlreadyCanceled = 4003,
    /// Date or time string could not be parsed
    InvalidDateTimeFormat = 4004,
    /// Menu selection is missing one or more categories
    MenuIncomplete = 4005,
    /// Guest counts are inconsistent
    GuestCountInvalid = 4006,
    /// Requested date is fully booked
    DateFullyBooked = 4007,
    /// A submission is already in flight
    SubmissionInFlight = 4008,

    // ==================== 9xxx: System ====================
    /// Internal error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Network error
    NetworkError = 9003,
    /// Operation timeout
    TimeoutError = 9004,
    /// Configuration error
    ConfigError = 9005,
    /// Serialization error
    SerializationError = 9006,
    /// Realtime subscription closed
    SubscriptionClosed = 9101,
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

            // Auth / Profile
            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::InvalidCredentials => "Invalid credentials",
            ErrorCode::SessionExpired => "Session has expired",
            ErrorCode::TokenExpired => "Authentication token has expired",
            ErrorCode::ProfileNotFound => "Profile not found",

            // Reservation
            ErrorCode::ReservationNotFound => "Reservation not found",
            ErrorCode::ReservationNotPending => "Reservation is no longer pending",
            ErrorCode::ReservationAlreadyCanceled => "Reservation has already been canceled",
            ErrorCode::InvalidDateTimeFormat => "Invalid date or time format",
            ErrorCode::MenuIncomplete => "Please choose one item for every menu category",
            ErrorCode::GuestCountInvalid => "Guest counts are inconsistent",
            ErrorCode::DateFullyBooked => "The selected date is fully booked",
            ErrorCode::SubmissionInFlight => "A submission is already in progress",

            // System
            ErrorCode::InternalError => "Internal error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::NetworkError => "Network error",
            ErrorCode::TimeoutError => "Operation timed out",
            ErrorCode::ConfigError => "Configuration error",
            ErrorCode::SerializationError => "Serialization error",
            ErrorCode::SubscriptionClosed => "Realtime subscription closed",
        }
    }

    /// Get the HTTP status code the hosted backend maps this error to
    pub const fn http_status(&self) -> StatusCode {
        match self {
            ErrorCode::Success => StatusCode::OK,

            ErrorCode::NotFound
            | ErrorCode::ProfileNotFound
            | ErrorCode::ReservationNotFound => StatusCode::NOT_FOUND,

            ErrorCode::AlreadyExists => StatusCode::CONFLICT,

            ErrorCode::NotAuthenticated
            | ErrorCode::InvalidCredentials
            | ErrorCode::SessionExpired
            | ErrorCode::TokenExpired => StatusCode::UNAUTHORIZED,

            ErrorCode::ReservationNotPending
            | ErrorCode::ReservationAlreadyCanceled
            | ErrorCode::DateFullyBooked
            | ErrorCode::SubmissionInFlight => StatusCode::UNPROCESSABLE_ENTITY,

            ErrorCode::ValidationFailed
            | ErrorCode::InvalidRequest
            | ErrorCode::InvalidFormat
            | ErrorCode::RequiredField
            | ErrorCode::ValueOutOfRange
            | ErrorCode::InvalidDateTimeFormat
            | ErrorCode::MenuIncomplete
            | ErrorCode::GuestCountInvalid => StatusCode::BAD_REQUEST,

            ErrorCode::TimeoutError => StatusCode::GATEWAY_TIMEOUT,

            ErrorCode::Unknown
            | ErrorCode::InternalError
            | ErrorCode::DatabaseError
            | ErrorCode::NetworkError
            | ErrorCode::ConfigError
            | ErrorCode::SerializationError
            | ErrorCode::SubscriptionClosed => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error returned when converting an unknown u16 into an [`ErrorCode`]
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
        let code = match value {
            0 => ErrorCode::Success,
            1 => ErrorCode::Unknown,
            2 => ErrorCode::ValidationFailed,
            3 => ErrorCode::NotFound,
            4 => ErrorCode::AlreadyExists,
            5 => ErrorCode::InvalidRequest,
            6 => ErrorCode::InvalidFormat,
            7 => ErrorCode::RequiredField,
            8 => ErrorCode::ValueOutOfRange,
            1001 => ErrorCode::NotAuthenticated,
            1002 => ErrorCode::InvalidCredentials,
            1003 => ErrorCode::SessionExpired,
            1004 => ErrorCode::TokenExpired,
            1101 => ErrorCode::ProfileNotFound,
            4001 => ErrorCode::ReservationNotFound,
            4002 => ErrorCode::ReservationNotPending,
            4003 => ErrorCode::ReservationAlreadyCanceled,
            4004 => ErrorCode::InvalidDateTimeFormat,
            4005 => ErrorCode::MenuIncomplete,
            4006 => ErrorCode::GuestCountInvalid,
            4007 => ErrorCode::DateFullyBooked,
            4008 => ErrorCode::SubmissionInFlight,
            9001 => ErrorCode::InternalError,
            9002 => ErrorCode::DatabaseError,
            9003 => ErrorCode::NetworkError,
            9004 => ErrorCode::TimeoutError,
            9005 => ErrorCode::ConfigError,
            9006 => ErrorCode::SerializationError,
            9101 => ErrorCode::SubscriptionClosed,
            other => return Err(InvalidErrorCode(other)),
        };
        Ok(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_roundtrip() {
        for code in [
            ErrorCode::Success,
            ErrorCode::ValidationFailed,
            ErrorCode::NotAuthenticated,
            ErrorCode::ReservationNotPending,
            ErrorCode::InvalidDateTimeFormat,
            ErrorCode::InternalError,
            ErrorCode::SubscriptionClosed,
        ] {
            assert_eq!(ErrorCode::try_from(code.code()), Ok(code));
        }
    }

    #[test]
    fn test_invalid_code_rejected() {
        assert_eq!(ErrorCode::try_from(1234), Err(InvalidErrorCode(1234)));
    }

    #[test]
    fn test_http_status() {
        assert_eq!(
            ErrorCode::ReservationNotFound.http_status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ErrorCode::NotAuthenticated.http_status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ErrorCode::InvalidDateTimeFormat.http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ErrorCode::ReservationNotPending.http_status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn test_serialize_as_u16() {
        let json = serde_json::to_string(&ErrorCode::InvalidDateTimeFormat).unwrap();
        assert_eq!(json, "4004");
        let parsed: ErrorCode = serde_json::from_str("4004").unwrap();
        assert_eq!(parsed, ErrorCode::InvalidDateTimeFormat);
    }
}
