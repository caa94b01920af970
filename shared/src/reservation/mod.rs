//! Reservation rules core
//!
//! Pure, synchronous validation and derivation logic: the lifecycle
//! status model, guest-count validators, menu selection aggregator,
//! date/time normalizer and the availability calendar. No I/O here;
//! the client crate orchestrates these against the hosted backend.

pub mod calendar;
pub mod datetime;
pub mod guests;
pub mod menu;
pub mod status;

// Re-exports
pub use calendar::{FULLY_BOOKED_THRESHOLD, derive_calendar, filter_days};
pub use datetime::normalize;
pub use guests::{GuestCounts, GuestValidation};
pub use menu::{MenuCategory, MenuSelection};
pub use status::ReservationStatus;
