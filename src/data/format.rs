//! Human-readable formatting for byte sizes, uptimes and dates.

use chrono::NaiveDate;
use thiserror::Error;

/// Unit labels for [`format_bytes`], one per power of 1024.
const BYTE_UNITS: [&str; 9] = ["Bytes", "KB", "MB", "GB", "TB", "PB", "EB", "ZB", "YB"];

const KIB: f64 = 1024.0;

/// Input rejected by a formatter.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormatError {
    /// The value lies outside the formatter's domain (negative, NaN, infinite).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Format a byte count as `"<value> <unit>"`, with the value rounded to two
/// decimals and trailing zeros dropped (`1536` -> `"1.5 KB"`).
///
/// Zero is the literal `"0 Bytes"`. Values past the last unit stay in `YB`.
/// Negative and non-finite counts are rejected.
pub fn format_bytes(bytes: f64) -> Result<String, FormatError> {
    if !bytes.is_finite() {
        return Err(FormatError::InvalidArgument(format!(
            "byte count must be finite, got {}",
            bytes
        )));
    }
    if bytes < 0.0 {
        return Err(FormatError::InvalidArgument(format!(
            "byte count must be non-negative, got {}",
            bytes
        )));
    }
    if bytes == 0.0 {
        return Ok("0 Bytes".to_string());
    }

    let mut value = bytes;
    let mut unit = 0;
    while value >= KIB && unit < BYTE_UNITS.len() - 1 {
        value /= KIB;
        unit += 1;
    }

    Ok(format!("{} {}", round_to_hundredths(value), BYTE_UNITS[unit]))
}

/// Round half away from zero to two decimals.
fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Format elapsed seconds as `"HHh MMm SSs "` (trailing space included).
///
/// Hours are zero-padded to two digits but not capped, so 100 hours renders
/// as `"100h 00m 00s "`.
pub fn format_uptime(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds / 60) % 60;
    let secs = seconds % 60;
    format!("{:02}h {:02}m {:02}s ", hours, minutes, secs)
}

/// Format a calendar date as zero-padded `MM/DD/YYYY`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%m/%d/%Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes_zero_is_literal() {
        assert_eq!(format_bytes(0.0).unwrap(), "0 Bytes");
    }

    #[test]
    fn test_format_bytes_whole_units_drop_decimals() {
        assert_eq!(format_bytes(1024.0).unwrap(), "1 KB");
        assert_eq!(format_bytes(1_048_576.0).unwrap(), "1 MB");
        assert_eq!(format_bytes(1024f64.powi(3)).unwrap(), "1 GB");
    }

    #[test]
    fn test_format_bytes_fractional() {
        assert_eq!(format_bytes(1536.0).unwrap(), "1.5 KB");
        assert_eq!(format_bytes(500.0).unwrap(), "500 Bytes");
        // 1.2345 KB rounds to two decimals
        assert_eq!(format_bytes(1264.128).unwrap(), "1.23 KB");
    }

    #[test]
    fn test_format_bytes_rounds_half_up() {
        // 1.125 KB is exactly representable, so rounding is not banker's
        assert_eq!(format_bytes(1152.0).unwrap(), "1.13 KB");
    }

    #[test]
    fn test_format_bytes_typical_disk() {
        // 120 GiB and a bit
        let free = 120.0 * 1024f64.powi(3) + 300.0 * 1024f64.powi(2);
        assert_eq!(format_bytes(free).unwrap(), "120.29 GB");
    }

    #[test]
    fn test_format_bytes_clamps_to_largest_unit() {
        assert_eq!(format_bytes(1024f64.powi(8)).unwrap(), "1 YB");
        assert_eq!(format_bytes(1024f64.powi(9)).unwrap(), "1024 YB");
        assert_eq!(format_bytes(1024f64.powi(10)).unwrap(), "1048576 YB");
    }

    #[test]
    fn test_format_bytes_rejects_negative() {
        let err = format_bytes(-1.0).unwrap_err();
        assert!(matches!(err, FormatError::InvalidArgument(_)));
        assert!(err.to_string().contains("non-negative"));
    }

    #[test]
    fn test_format_bytes_rejects_non_finite() {
        assert!(format_bytes(f64::NAN).is_err());
        assert!(format_bytes(f64::INFINITY).is_err());
    }

    #[test]
    fn test_format_uptime() {
        assert_eq!(format_uptime(0), "00h 00m 00s ");
        assert_eq!(format_uptime(61), "00h 01m 01s ");
        assert_eq!(format_uptime(3661), "01h 01m 01s ");
        assert_eq!(format_uptime(86_399), "23h 59m 59s ");
    }

    #[test]
    fn test_format_uptime_hours_are_not_capped() {
        assert_eq!(format_uptime(360_000), "100h 00m 00s ");
        assert_eq!(format_uptime(360_000 * 10 + 59), "1000h 00m 59s ");
    }

    #[test]
    fn test_format_date_pads_month_and_day() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(format_date(date), "03/07/2024");

        let date = NaiveDate::from_ymd_opt(1999, 12, 31).unwrap();
        assert_eq!(format_date(date), "12/31/1999");
    }
}
