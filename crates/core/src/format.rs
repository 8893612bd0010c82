//! Display formatting for car cards.
//!
//! Dates render as `d MMM yyyy, HH:mm` (e.g. `4 Apr 2022, 09:00`) and
//! prices use the Indonesian (`id-ID`) number conventions: `.` groups
//! thousands, `,` separates at most three fraction digits.

use chrono::FixedOffset;

use crate::types::Timestamp;

/// `strftime` pattern for timestamps shown on a card.
pub const TIMESTAMP_FORMAT: &str = "%-d %b %Y, %H:%M";

/// `strftime` pattern for a bare calendar date (rent period bounds).
pub const DATE_FORMAT: &str = "%-d %b %Y";

/// Maximum fraction digits kept when formatting a price.
const MAX_FRACTION_DIGITS: u32 = 3;

/// Format a timestamp as `d MMM yyyy, HH:mm` in the given display offset.
///
/// ```
/// use chrono::{FixedOffset, TimeZone, Utc};
/// use rental_core::format::format_timestamp;
///
/// let ts = Utc.with_ymd_and_hms(2022, 4, 4, 2, 0, 0).unwrap();
/// let wib = FixedOffset::east_opt(7 * 3600).unwrap();
/// assert_eq!(format_timestamp(&ts, &wib), "4 Apr 2022, 09:00");
/// ```
pub fn format_timestamp(ts: &Timestamp, offset: &FixedOffset) -> String {
    ts.with_timezone(offset).format(TIMESTAMP_FORMAT).to_string()
}

/// Format only the calendar date of a timestamp (`d MMM yyyy`).
pub fn format_date(ts: &Timestamp, offset: &FixedOffset) -> String {
    ts.with_timezone(offset).format(DATE_FORMAT).to_string()
}

/// Format a price with `id-ID` grouping.
///
/// ```
/// use rental_core::format::format_price;
///
/// assert_eq!(format_price(150000.0), "150.000");
/// assert_eq!(format_price(1250.5), "1.250,5");
/// ```
pub fn format_price(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "∞" } else { "-∞" }.to_string();
    }

    let scale = 10u128.pow(MAX_FRACTION_DIGITS);
    // `as` saturates on overflow, which is fine for display purposes.
    let scaled = (value.abs() * scale as f64).round() as u128;
    let whole = scaled / scale;
    let fraction = scaled % scale;

    let mut out = String::new();
    if value < 0.0 && scaled != 0 {
        out.push('-');
    }
    out.push_str(&group_thousands(whole));

    if fraction != 0 {
        let digits = format!("{fraction:0width$}", width = MAX_FRACTION_DIGITS as usize);
        out.push(',');
        out.push_str(digits.trim_end_matches('0'));
    }

    out
}

/// Insert `.` between every group of three digits, counting from the right.
fn group_thousands(value: u128) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    grouped
}
