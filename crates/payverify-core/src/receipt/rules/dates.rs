//! Payment date normalization.

use chrono::NaiveDateTime;
use tracing::trace;

/// Date-time layouts seen on receipts, tried in order. Day and month fields
/// accept one or two digits in every layout.
pub const DATE_FORMATS: [&str; 6] = [
    // TeleBirr: 06-11-2025 11:40:12
    "%d-%m-%Y %H:%M:%S",
    // CBE: 1/6/2026, 12:44:00 PM
    "%m/%d/%Y, %I:%M:%S %p",
    // CBE, day first
    "%d/%m/%Y, %I:%M:%S %p",
    // CBE, zero-padded
    "%m/%d/%Y, %I:%M:%S %p",
    "%Y-%m-%d %H:%M:%S",
    "%d/%m/%Y %H:%M:%S",
];

/// Parse a receipt date. Returns `None` when no known layout matches.
pub fn parse_payment_date(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    let parsed = DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok());

    if parsed.is_none() {
        trace!("No date layout matched {:?}", text);
    }
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn datetime(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test]
    fn test_telebirr_date() {
        assert_eq!(
            parse_payment_date("06-11-2025 11:40:12"),
            Some(datetime(2025, 11, 6, 11, 40, 12))
        );
    }

    #[test]
    fn test_telebirr_date_without_padding() {
        assert_eq!(
            parse_payment_date("6-11-2025 11:40:12"),
            Some(datetime(2025, 11, 6, 11, 40, 12))
        );
    }

    #[test]
    fn test_cbe_month_first() {
        assert_eq!(
            parse_payment_date("1/6/2026, 12:44:00 PM"),
            Some(datetime(2026, 1, 6, 12, 44, 0))
        );
        assert_eq!(
            parse_payment_date("01/06/2026, 3:05:09 AM"),
            Some(datetime(2026, 1, 6, 3, 5, 9))
        );
    }

    #[test]
    fn test_cbe_day_first_when_month_invalid() {
        assert_eq!(
            parse_payment_date("25/12/2025, 9:15:00 PM"),
            Some(datetime(2025, 12, 25, 21, 15, 0))
        );
    }

    #[test]
    fn test_iso_and_24_hour() {
        assert_eq!(
            parse_payment_date("2025-11-06 11:40:12"),
            Some(datetime(2025, 11, 6, 11, 40, 12))
        );
        assert_eq!(
            parse_payment_date("25/12/2025 18:00:00"),
            Some(datetime(2025, 12, 25, 18, 0, 0))
        );
    }

    #[test]
    fn test_surrounding_whitespace() {
        assert!(parse_payment_date("  06-11-2025 11:40:12\n").is_some());
    }

    #[test]
    fn test_unparseable() {
        assert_eq!(parse_payment_date("not a date"), None);
        assert_eq!(parse_payment_date(""), None);
        assert_eq!(parse_payment_date("06-11-2025"), None);
    }
}
