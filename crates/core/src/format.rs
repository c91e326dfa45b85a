//! Display formatting for grid cells, tracker cards and toasts.
//!
//! Output mirrors the `en-AU` locale: AUD currency without cents, short
//! weekday/month names, 12-hour clock with lowercase am/pm.

use chrono::{FixedOffset, NaiveDate, NaiveDateTime, Offset, Utc};

use crate::types::Timestamp;

/// Default display offset for server timestamps: UTC+10 (Sydney standard time).
pub const DEFAULT_DISPLAY_OFFSET_MINUTES: i32 = 600;

/// `$150,000` style currency with zero decimals.
pub fn format_currency_aud(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if amount < 0 {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

/// Salary cell text. Missing and zero salaries render empty.
pub fn format_salary(amount: Option<i64>) -> String {
    match amount {
        Some(n) if n != 0 => format_currency_aud(n),
        _ => String::new(),
    }
}

/// `Mon, 06 Jan 2025`
pub fn format_date_short(date: NaiveDate) -> String {
    date.format("%a, %d %b %Y").to_string()
}

/// `Mon, 06 Jan 2025, 3:05 pm`
pub fn format_date_full(date_time: NaiveDateTime) -> String {
    date_time.format("%a, %d %b %Y, %-I:%M %P").to_string()
}

/// Picker button text for a date-time: `06 Jan 2025 | 03:05 PM`.
pub fn format_picker_date_time(date_time: NaiveDateTime) -> String {
    date_time.format("%d %b %Y | %I:%M %p").to_string()
}

/// Picker button text for a date: `06 Jan 2025`.
pub fn format_picker_date(date: NaiveDate) -> String {
    date.format("%d %b %Y").to_string()
}

/// Build the display offset from minutes east of UTC, falling back to UTC
/// when out of range.
pub fn display_offset(minutes_east: i32) -> FixedOffset {
    FixedOffset::east_opt(minutes_east * 60).unwrap_or_else(|| Utc.fix())
}

/// Server timestamp rendered in the display offset, full form.
pub fn format_timestamp(ts: Timestamp, offset: FixedOffset) -> String {
    format_date_full(ts.with_timezone(&offset).naive_local())
}

/// Toast subtitle: `06/01/2025, 3:05:09 pm`.
pub fn format_toast_time(ts: Timestamp, offset: FixedOffset) -> String {
    ts.with_timezone(&offset)
        .format("%d/%m/%Y, %-I:%M:%S %P")
        .to_string()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_currency_grouping() {
        assert_eq!(format_currency_aud(150_000), "$150,000");
        assert_eq!(format_currency_aud(999), "$999");
        assert_eq!(format_currency_aud(1_000), "$1,000");
        assert_eq!(format_currency_aud(1_234_567), "$1,234,567");
        assert_eq!(format_currency_aud(0), "$0");
    }

    #[test]
    fn test_salary_blank_when_missing_or_zero() {
        assert_eq!(format_salary(None), "");
        assert_eq!(format_salary(Some(0)), "");
        assert_eq!(format_salary(Some(85_000)), "$85,000");
    }

    #[test]
    fn test_short_date() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
        assert_eq!(format_date_short(date), "Mon, 06 Jan 2025");
        assert_eq!(format_picker_date(date), "06 Jan 2025");
    }

    #[test]
    fn test_full_date_time() {
        let dt = NaiveDate::from_ymd_opt(2025, 1, 6)
            .unwrap()
            .and_hms_opt(15, 5, 0)
            .unwrap();
        assert_eq!(format_date_full(dt), "Mon, 06 Jan 2025, 3:05 pm");
        assert_eq!(format_picker_date_time(dt), "06 Jan 2025 | 03:05 PM");
    }

    #[test]
    fn test_timestamp_uses_display_offset() {
        let ts = Utc.with_ymd_and_hms(2025, 1, 5, 23, 0, 0).unwrap();
        let sydney = display_offset(DEFAULT_DISPLAY_OFFSET_MINUTES);
        assert_eq!(format_timestamp(ts, sydney), "Mon, 06 Jan 2025, 9:00 am");
        assert_eq!(format_toast_time(ts, sydney), "06/01/2025, 9:00:00 am");
    }

    #[test]
    fn test_out_of_range_offset_falls_back_to_utc() {
        assert_eq!(display_offset(100_000).local_minus_utc(), 0);
    }
}
