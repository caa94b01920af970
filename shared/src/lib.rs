//! Shared types for the Fiesta catering reservation client
//!
//! Domain models, the reservation rules core, unified error types and
//! small utilities used across the client crates.

pub mod error;
pub mod models;
pub mod reservation;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use error::{AppError, AppResult, ErrorCode};
pub use models::{CalendarDay, CatalogRef, DayStatus, Profile, Reservation};
pub use reservation::status::ReservationStatus;
