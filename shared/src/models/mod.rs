//! Data models
//!
//! Row types shared between the client services and the hosted backend.
//! Numeric IDs are `i64` (assigned by the store); rows carry dates and
//! times as canonical strings (`YYYY-MM-DD` / `HH:MM:SS`).

pub mod calendar;
pub mod catalog;
pub mod profile;
pub mod reservation;

// Re-exports
pub use calendar::*;
pub use catalog::*;
pub use profile::*;
pub use reservation::*;
