//! Date/time normalization
//!
//! Converts heterogeneous user-entered date and time text into a
//! canonical (`YYYY-MM-DD`, `HH:MM:SS`) pair. Unlike the other
//! validators this one fails loudly: callers sit in the submission path
//! and must abort on bad input.

use crate::error::{AppError, AppResult};
use chrono::{NaiveDate, NaiveTime};

/// Normalize a user-entered date/time pair.
///
/// Accepted date forms: `MM/DD/YYYY` (US, slash-delimited) and ISO
/// `YYYY-MM-DD`. Accepted time forms: 12-hour with an `AM`/`PM` suffix,
/// 24-hour `H:MM[:SS]`, compact numeric (`"730"` is 07:30) and the empty
/// string (midnight). Any other input fails with
/// [`crate::error::ErrorCode::InvalidDateTimeFormat`] and the message
/// "Invalid date or time format".
///
/// Normalization is idempotent: feeding an already-canonical pair back
/// in yields the same pair.
pub fn normalize(date: &str, time: &str) -> AppResult<(String, String)> {
    let date = parse_date(date.trim()).ok_or_else(AppError::invalid_datetime)?;
    let time = parse_time(time.trim()).ok_or_else(AppError::invalid_datetime)?;
    Ok((
        date.format("%Y-%m-%d").to_string(),
        time.format("%H:%M:%S").to_string(),
    ))
}

fn parse_date(text: &str) -> Option<NaiveDate> {
    if text.contains('/') {
        // US month-first ordering.
        let parts: Vec<&str> = text.split('/').collect();
        if parts.len() != 3 {
            return None;
        }
        let month: u32 = parts[0].trim().parse().ok()?;
        let day: u32 = parts[1].trim().parse().ok()?;
        let year: i32 = parts[2].trim().parse().ok()?;
        if month == 0 || day == 0 || year == 0 {
            return None;
        }
        NaiveDate::from_ymd_opt(year, month, day)
    } else if text.contains('-') {
        NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()
    } else {
        None
    }
}

fn parse_time(text: &str) -> Option<NaiveTime> {
    if text.is_empty() {
        return NaiveTime::from_hms_opt(0, 0, 0);
    }

    let upper = text.to_uppercase();
    if let Some(stripped) = upper.strip_suffix("AM").or_else(|| upper.strip_suffix("PM")) {
        let is_pm = upper.ends_with("PM");
        let (hour, minute, second) = split_hms(stripped.trim())?;
        let hour = match (is_pm, hour) {
            (true, 12) => 12,
            (true, h) => h + 12,
            (false, 12) => 0,
            (false, h) => h,
        };
        return NaiveTime::from_hms_opt(hour, minute, second);
    }

    if upper.contains(':') {
        let (hour, minute, second) = split_hms(&upper)?;
        return NaiveTime::from_hms_opt(hour, minute, second);
    }

    // Compact numeric form: "730" is 07:30, "1245" is 12:45.
    if upper.len() >= 3 && upper.chars().all(|c| c.is_ascii_digit()) {
        let (hour_part, minute_part) = upper.split_at(upper.len() - 2);
        let hour: u32 = hour_part.parse().ok()?;
        let minute: u32 = minute_part.parse().ok()?;
        return NaiveTime::from_hms_opt(hour, minute, 0);
    }

    None
}

fn split_hms(text: &str) -> Option<(u32, u32, u32)> {
    let parts: Vec<&str> = text.split(':').collect();
    match parts.as_slice() {
        [hour, minute] => Some((hour.trim().parse().ok()?, minute.trim().parse().ok()?, 0)),
        [hour, minute, second] => Some((
            hour.trim().parse().ok()?,
            minute.trim().parse().ok()?,
            second.trim().parse().ok()?,
        )),
        _ => None,
    }
}
