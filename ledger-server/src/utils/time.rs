//! Time helpers — business timezone conversions
//!
//! Summary period keys and date-range bounds are always computed in the
//! shop's business timezone; repositories only ever see `i64` Unix millis or
//! preformatted period keys.

use chrono::{NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;

use super::{AppError, AppResult};

/// Parse a date string (YYYY-MM-DD)
pub fn parse_date(date: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| AppError::validation(format!("Invalid date format: {date}")))
}

/// Parse a month string (YYYY-MM)
pub fn parse_month(month: &str) -> AppResult<()> {
    NaiveDate::parse_from_str(&format!("{month}-01"), "%Y-%m-%d")
        .map(|_| ())
        .map_err(|_| AppError::validation(format!("Invalid month format: {month}")))
}

/// Resolve an IANA zone name
pub fn parse_timezone(name: &str) -> AppResult<Tz> {
    name.parse::<Tz>()
        .map_err(|_| AppError::validation(format!("Unknown timezone: {name}")))
}

/// Daily and monthly summary keys for a timestamp, in the business timezone.
///
/// Returns `("YYYY-MM-DD", "YYYY-MM")`. The zone placement decides which
/// business day an instant belongs to, so it must stay stable for a shop's
/// stored summary keys to line up.
pub fn period_keys(at_millis: i64, tz: Tz) -> (String, String) {
    let local = Utc
        .timestamp_millis_opt(at_millis)
        .single()
        .unwrap_or_else(Utc::now)
        .with_timezone(&tz);
    (
        local.format("%Y-%m-%d").to_string(),
        local.format("%Y-%m").to_string(),
    )
}

/// Date + hms -> Unix millis in the business timezone.
///
/// DST gap fallback: if the local time does not exist, fall back to UTC.
fn date_hms_to_millis(date: NaiveDate, hour: u32, min: u32, sec: u32, tz: Tz) -> i64 {
    let naive = date.and_hms_opt(hour, min, sec).unwrap_or_default();
    naive
        .and_local_timezone(tz)
        .latest()
        .map(|dt| dt.timestamp_millis())
        .unwrap_or_else(|| naive.and_utc().timestamp_millis())
}

/// Start of a date (00:00:00) -> Unix millis in the business timezone
pub fn day_start_millis(date: NaiveDate, tz: Tz) -> i64 {
    date_hms_to_millis(date, 0, 0, 0, tz)
}

/// End of a date -> next day 00:00:00 Unix millis; callers use `< end`
pub fn day_end_millis(date: NaiveDate, tz: Tz) -> i64 {
    let next_day = date.succ_opt().unwrap_or(date);
    date_hms_to_millis(next_day, 0, 0, 0, tz)
}
