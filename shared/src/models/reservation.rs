//! Reservation Model

use crate::models::catalog::CatalogRef;
use crate::reservation::menu::MenuSelection;
use crate::reservation::status::ReservationStatus;
use serde::{Deserialize, Serialize};

/// Reservation entity (row in the `reservations` table)
///
/// Created in `pending` state at submission. The status column is stored
/// as a raw string and mutated only by staff-driven transitions observed
/// over the realtime feed, or by a client-requested cancellation while
/// still pending. Rows are never hard-deleted; cancellation is a status
/// transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: Option<i64>,
    /// Human receipt code, minted at submission (`REC-...`)
    pub receipt_code: String,
    /// Owning profile
    pub profile_id: i64,
    pub celebrant_name: String,
    pub package: CatalogRef,
    pub theme: CatalogRef,
    pub grazing_table: Option<CatalogRef>,
    pub venue: String,
    /// Canonical event date (`YYYY-MM-DD`)
    pub event_date: String,
    /// Canonical event time (`HH:MM:SS`)
    pub event_time: String,
    /// Free-text location
    pub location: String,
    pub pax: i32,
    pub adults_qty: i32,
    pub kids_qty: i32,
    /// One chosen menu item per category
    pub menu_selection: MenuSelection,
    /// Raw status string; parse via [`Reservation::status`]
    pub status: String,
    pub created_at: Option<String>,
}

impl Reservation {
    /// Parse the raw status column, falling back to `pending` when the
    /// string is unrecognized (deliberate, see [`ReservationStatus::from_raw`]).
    pub fn status(&self) -> ReservationStatus {
        ReservationStatus::from_raw(&self.status)
    }
}

/// Create reservation payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationCreate {
    pub receipt_code: String,
    pub profile_id: i64,
    pub celebrant_name: String,
    pub package: CatalogRef,
    pub theme: CatalogRef,
    pub grazing_table: Option<CatalogRef>,
    pub venue: String,
    pub event_date: String,
    pub event_time: String,
    pub location: String,
    pub pax: i32,
    pub adults_qty: i32,
    pub kids_qty: i32,
    pub menu_selection: MenuSelection,
    pub status: String,
}
