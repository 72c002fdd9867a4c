//! Timestamps and their textual form.

use chrono::{DateTime, SecondsFormat, Utc};

/// UTC timestamp stamped on a product when it is created.
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time, truncated to microseconds so it survives a
/// round trip through text storage unchanged.
#[must_use]
pub fn now() -> Timestamp {
    let now = Utc::now();
    DateTime::from_timestamp_micros(now.timestamp_micros()).unwrap_or(now)
}

/// Render a timestamp as RFC 3339 with microsecond precision.
#[must_use]
pub fn to_text(ts: Timestamp) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parse an RFC 3339 string back into a UTC timestamp.
///
/// # Errors
///
/// Returns [`chrono::ParseError`] when `text` is not valid RFC 3339.
pub fn from_text(text: &str) -> Result<Timestamp, chrono::ParseError> {
    DateTime::parse_from_rfc3339(text).map(|ts| ts.to_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_return_current_utc_time() {
        let before = Utc::now();
        let ts = now();
        let after = Utc::now();
        assert!(ts <= after);
        assert!(before.timestamp_micros() <= ts.timestamp_micros());
    }

    #[test]
    fn should_roundtrip_through_text() {
        let ts = now();
        let parsed = from_text(&to_text(ts)).unwrap();
        assert_eq!(parsed, ts);
    }

    #[test]
    fn should_reject_garbage_text() {
        assert!(from_text("yesterday").is_err());
    }
}
