//! Availability calendar service
//!
//! Fetches reservation load for the remainder of the year and derives
//! the day-by-day availability view. Canceled reservations do not hold
//! a slot, so they are excluded before counting.

use crate::error::ClientResult;
use crate::store::{DataStore, Filter};
use chrono::{Datelike, NaiveDate};
use serde_json::Value;
use shared::models::CalendarDay;
use shared::reservation::calendar::{derive_calendar, filter_days};
use shared::reservation::status::ReservationStatus;
use std::collections::HashMap;
use std::sync::Arc;

pub struct AvailabilityService<S: DataStore> {
    store: Arc<S>,
}

impl<S: DataStore> AvailabilityService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// The availability calendar from `today` through December 31
    pub async fn calendar(&self, today: NaiveDate) -> ClientResult<Vec<CalendarDay>> {
        let year_end = format!("{}-12-31", today.year());
        let rows = self
            .store
            .select(
                "reservations",
                Filter::new()
                    .gte("event_date", today.format("%Y-%m-%d").to_string())
                    .lte("event_date", year_end),
            )
            .await?;

        let counts = count_active_by_date(&rows);
        Ok(derive_calendar(today, &counts))
    }

    /// Calendar narrowed by a free-text date query ("August", "2026", ...)
    pub async fn search(&self, today: NaiveDate, query: &str) -> ClientResult<Vec<CalendarDay>> {
        let days = self.calendar(today).await?;
        Ok(filter_days(&days, query))
    }
}

/// Count non-canceled reservations per event date.
///
/// Rows with an unparseable date are skipped rather than failing the
/// whole calendar; the backend owns date validity.
fn count_active_by_date(rows: &[Value]) -> HashMap<NaiveDate, u32> {
    let mut counts = HashMap::new();
    for row in rows {
        let status = row.get("status").and_then(Value::as_str).unwrap_or_default();
        if ReservationStatus::from_raw(status) == ReservationStatus::Canceled {
            continue;
        }
        let Some(date) = row
            .get("event_date")
            .and_then(Value::as_str)
            .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
        else {
            tracing::warn!("reservation row with unparseable event_date, skipping");
            continue;
        };
        *counts.entry(date).or_insert(0) += 1;
    }
    counts
}
