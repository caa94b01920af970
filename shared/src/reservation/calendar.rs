//! Availability calendar derivation
//!
//! Computes a day-by-day availability view for the remainder of the
//! current year from raw reservation counts per date.

use crate::models::calendar::{CalendarDay, DayStatus};
use chrono::{Datelike, NaiveDate};
use std::collections::HashMap;

/// A date with this many reservations (or more) is fully booked.
///
/// Business rule for a single-venue catering operation; named here so it
/// is the one place to change.
pub const FULLY_BOOKED_THRESHOLD: u32 = 2;

/// Derive the availability calendar from `today` (inclusive) through
/// December 31 of the current year.
///
/// `counts` holds existing reservation counts keyed by event date; dates
/// absent from the map count as zero.
pub fn derive_calendar(today: NaiveDate, counts: &HashMap<NaiveDate, u32>) -> Vec<CalendarDay> {
    let Some(year_end) = NaiveDate::from_ymd_opt(today.year(), 12, 31) else {
        return Vec::new();
    };

    let mut days = Vec::new();
    let mut date = today;
    while date <= year_end {
        let count = counts.get(&date).copied().unwrap_or(0);
        let status = if count >= FULLY_BOOKED_THRESHOLD {
            DayStatus::Unavailable
        } else {
            DayStatus::Available
        };
        days.push(CalendarDay { date, status });
        match date.succ_opt() {
            Some(next) => date = next,
            None => break,
        }
    }
    days
}

/// Case-insensitive substring filter over the human-formatted date
/// ("August 25, 2026") and the ISO form, so "August", "2026" and "25"
/// all match. An empty query keeps every day.
pub fn filter_days(days: &[CalendarDay], query: &str) -> Vec<CalendarDay> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return days.to_vec();
    }
    days.iter()
        .filter(|day| {
            day.display_date().to_lowercase().contains(&needle)
                || day.date.format("%Y-%m-%d").to_string().contains(&needle)
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_runs_from_today_through_year_end() {
        let today = date(2025, 12, 29);
        let days = derive_calendar(today, &HashMap::new());
        assert_eq!(days.len(), 3);
        assert_eq!(days[0].date, today);
        assert_eq!(days[2].date, date(2025, 12, 31));
    }

    #[test]
    fn test_threshold_classification() {
        let today = date(2025, 6, 1);
        let mut counts = HashMap::new();
        counts.insert(date(2025, 6, 1), 2);
        counts.insert(date(2025, 6, 2), 1);
        counts.insert(date(2025, 6, 3), 5);

        let days = derive_calendar(today, &counts);
        assert_eq!(days[0].status, DayStatus::Unavailable); // exactly 2
        assert_eq!(days[1].status, DayStatus::Available); // only 1
        assert_eq!(days[2].status, DayStatus::Unavailable); // over
        assert_eq!(days[3].status, DayStatus::Available); // zero, absent from map
    }

    #[test]
    fn test_zero_count_never_unavailable() {
        let today = date(2025, 11, 1);
        let days = derive_calendar(today, &HashMap::new());
        assert!(days.iter().all(|d| d.status == DayStatus::Available));
    }

    #[test]
    fn test_filter_by_month_name_year_and_day() {
        let days = derive_calendar(date(2025, 8, 20), &HashMap::new());

        let august = filter_days(&days, "August");
        assert_eq!(august.len(), 12); // Aug 20..=31

        let by_year = filter_days(&days, "2025");
        assert_eq!(by_year.len(), days.len());

        let by_day = filter_days(&days, "august 25");
        assert_eq!(by_day.len(), 1);
        assert_eq!(by_day[0].date, date(2025, 8, 25));

        // Case-insensitive.
        assert_eq!(filter_days(&days, "aUgUsT").len(), 12);
    }

    #[test]
    fn test_empty_query_keeps_everything() {
        let days = derive_calendar(date(2025, 12, 30), &HashMap::new());
        assert_eq!(filter_days(&days, "  ").len(), days.len());
    }

    #[test]
    fn test_display_date_format() {
        let day = CalendarDay {
            date: date(2026, 8, 5),
            status: DayStatus::Available,
        };
        assert_eq!(day.display_date(), "August 5, 2026");
    }
}
