//! Timestamp utilities

use chrono::{DateTime, TimeZone, Utc};

/// Convert unix seconds into a UTC timestamp
///
/// Returns `None` for values chrono cannot represent.
pub fn from_unix_seconds(seconds: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_opt(seconds, 0).single()
}

/// Convert fractional unix seconds (as reported by Reddit's `created_utc`)
/// into a UTC timestamp, truncating sub-second precision
pub fn from_unix_seconds_f64(seconds: f64) -> Option<DateTime<Utc>> {
    if !seconds.is_finite() {
        return None;
    }
    from_unix_seconds(seconds.trunc() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_unix_seconds_round_trip() {
        let timestamp = from_unix_seconds(1_600_000_000).unwrap();
        assert_eq!(timestamp.timestamp(), 1_600_000_000);
    }

    #[test]
    fn test_from_unix_seconds_f64_truncates() {
        let timestamp = from_unix_seconds_f64(1_600_000_000.75).unwrap();
        assert_eq!(timestamp.timestamp(), 1_600_000_000);
    }

    #[test]
    fn test_from_unix_seconds_f64_rejects_nan() {
        assert!(from_unix_seconds_f64(f64::NAN).is_none());
        assert!(from_unix_seconds_f64(f64::INFINITY).is_none());
    }

    #[test]
    fn test_from_unix_seconds_out_of_range() {
        assert!(from_unix_seconds(i64::MAX).is_none());
    }
}
