//! Calendar Model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Availability of a single calendar day (derived, never persisted)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayStatus {
    Available,
    Unavailable,
}

/// A derived calendar day for the availability view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub status: DayStatus,
}

impl CalendarDay {
    /// Human-formatted date used for client-side search ("August 25, 2026")
    pub fn display_date(&self) -> String {
        self.date.format("%B %-d, %Y").to_string()
    }
}
