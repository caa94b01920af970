//! Fiesta Client - reservation client services over the hosted backend
//!
//! Orchestrates the reservation rules core from `shared` against the
//! external collaborators: the relational data store, the identity
//! provider, the realtime change feed and the notification dispatcher.

pub mod availability;
pub mod config;
pub mod error;
pub mod http;
pub mod notify;
pub mod realtime;
pub mod reservations;
pub mod session;
pub mod store;

pub use availability::AvailabilityService;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::RestStore;
pub use notify::{LogNotifier, Notification, Notifier};
pub use realtime::{ChangeEvent, ChangeKind, RealtimeSubscription, ReservationCache, StatusChange};
pub use reservations::{ReservationForm, ReservationService};
pub use session::{AppContext, AuthProvider, Session};
pub use store::{DataStore, Filter, MemoryStore};

// Re-export shared types for convenience
pub use shared::{AppError, AppResult, Reservation, ReservationStatus};
