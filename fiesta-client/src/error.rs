//! Client error types

use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// Client error type
///
/// Validation and business-rule failures travel as [`AppError`] with
/// their structured codes; everything else is a transport-level failure
/// surfaced to the user as a generic message.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Structured application error (validation, business rule, backend)
    #[error(transparent)]
    App(#[from] AppError),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Operation timed out
    #[error("Operation timed out")]
    Timeout,

    /// Realtime subscription closed
    #[error("Realtime subscription closed")]
    SubscriptionClosed,
}

impl ClientError {
    /// The structured error code, mapping transport failures into the
    /// system band.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::App(err) => err.code,
            Self::Http(_) => ErrorCode::NetworkError,
            Self::Serialization(_) => ErrorCode::SerializationError,
            Self::Timeout => ErrorCode::TimeoutError,
            Self::SubscriptionClosed => ErrorCode::SubscriptionClosed,
        }
    }

    /// Message safe to show the user.
    ///
    /// Validation and business errors carry their own text; transport
    /// errors are logged and collapsed into a generic message.
    pub fn user_message(&self) -> String {
        match self {
            Self::App(err) => err.message.clone(),
            other => {
                tracing::error!(error = %other, "backend call failed");
                "Something went wrong. Please try again.".to_string()
            }
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
