//! Timestamp value object for immutable points in time.

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Immutable point in time, always UTC.
///
/// Handlers receive "now" as an explicit `Timestamp` argument instead of
/// reading ambient system time, so date-boundary behavior stays
/// deterministic under test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a timestamp from a DateTime<Utc>.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Returns the inner DateTime.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Checks if this timestamp is before another.
    pub fn is_before(&self, other: &Timestamp) -> bool {
        self.0 < other.0
    }

    /// Checks if this timestamp is after another.
    pub fn is_after(&self, other: &Timestamp) -> bool {
        self.0 > other.0
    }

    /// Returns the duration from another timestamp to this one.
    ///
    /// Returns negative duration if other is after self.
    pub fn duration_since(&self, other: &Timestamp) -> Duration {
        self.0.signed_duration_since(other.0)
    }

    /// Number of whole-or-partial days from self to `other`, rounded up.
    ///
    /// Returns 0 when `other` is not after self. This is the day-count
    /// rule for refund proration: any started day counts as a full day.
    pub fn days_until_ceil(&self, other: &Timestamp) -> i64 {
        let secs = other.0.signed_duration_since(self.0).num_seconds();
        if secs <= 0 {
            return 0;
        }
        (secs + 86_399) / 86_400
    }

    /// Creates a new timestamp by adding the specified number of days.
    ///
    /// Negative values subtract days.
    pub fn add_days(&self, days: i64) -> Self {
        Self(self.0 + Duration::days(days))
    }

    /// Creates a new timestamp by subtracting the specified number of days.
    pub fn minus_days(&self, days: i64) -> Self {
        Self(self.0 - Duration::days(days))
    }

    /// Creates a new timestamp by adding the specified number of minutes.
    pub fn plus_minutes(&self, minutes: i64) -> Self {
        Self(self.0 + Duration::minutes(minutes))
    }

    /// Creates a new timestamp by adding the specified number of seconds.
    pub fn plus_secs(&self, secs: u64) -> Self {
        Self(self.0 + Duration::seconds(secs as i64))
    }

    /// Creates a timestamp from Unix milliseconds.
    ///
    /// The coupon session serializes `appliedAt` as epoch millis.
    pub fn from_epoch_ms(ms: i64) -> Self {
        Self(Utc.timestamp_millis_opt(ms).single().unwrap_or_default())
    }

    /// Returns the timestamp as Unix milliseconds.
    pub fn as_epoch_ms(&self) -> i64 {
        self.0.timestamp_millis()
    }

    /// Creates a timestamp from Unix seconds.
    pub fn from_unix_secs(secs: u64) -> Self {
        Self(Utc.timestamp_opt(secs as i64, 0).single().unwrap_or_default())
    }

    /// Returns the timestamp as Unix seconds.
    pub fn as_unix_secs(&self) -> u64 {
        self.0.timestamp() as u64
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;
    use std::thread::sleep;
    use std::time::Duration;

    #[test]
    fn timestamp_now_creates_current_time() {
        let before = Utc::now();
        let ts = Timestamp::now();
        let after = Utc::now();

        assert!(ts.as_datetime() >= &before);
        assert!(ts.as_datetime() <= &after);
    }

    #[test]
    fn timestamp_is_before_works_correctly() {
        let ts1 = Timestamp::now();
        sleep(Duration::from_millis(10));
        let ts2 = Timestamp::now();

        assert!(ts1.is_before(&ts2));
        assert!(!ts2.is_before(&ts1));
    }

    #[test]
    fn timestamp_is_after_works_correctly() {
        let ts1 = Timestamp::now();
        sleep(Duration::from_millis(10));
        let ts2 = Timestamp::now();

        assert!(ts2.is_after(&ts1));
        assert!(!ts1.is_after(&ts2));
    }

    #[test]
    fn days_until_ceil_rounds_partial_days_up() {
        let start = Timestamp::from_unix_secs(0);
        let end = start.plus_secs(86_400 + 1);
        assert_eq!(start.days_until_ceil(&end), 2);
    }

    #[test]
    fn days_until_ceil_exact_days_stay_exact() {
        let start = Timestamp::from_unix_secs(0);
        let end = start.add_days(30);
        assert_eq!(start.days_until_ceil(&end), 30);
    }

    #[test]
    fn days_until_ceil_is_zero_when_not_after() {
        let start = Timestamp::from_unix_secs(1_000_000);
        assert_eq!(start.days_until_ceil(&start), 0);
        assert_eq!(start.days_until_ceil(&start.minus_days(3)), 0);
    }

    #[test]
    fn timestamp_serializes_to_json() {
        let dt = DateTime::parse_from_rfc3339("2026-01-15T10:30:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let ts = Timestamp::from_datetime(dt);

        let json = serde_json::to_string(&ts).unwrap();
        assert!(json.contains("2026-01-15"));
    }

    #[test]
    fn timestamp_deserializes_from_json() {
        let json = "\"2026-01-15T10:30:00Z\"";
        let ts: Timestamp = serde_json::from_str(json).unwrap();

        assert_eq!(ts.as_datetime().year(), 2026);
    }

    #[test]
    fn timestamp_epoch_ms_roundtrips() {
        let ms = 1_705_276_800_123_i64;
        let ts = Timestamp::from_epoch_ms(ms);
        assert_eq!(ts.as_epoch_ms(), ms);
    }

    #[test]
    fn timestamp_plus_minutes_adds_correctly() {
        let ts1 = Timestamp::from_unix_secs(1000);
        let ts2 = ts1.plus_minutes(30);
        assert_eq!(ts2.as_unix_secs(), 1000 + 1800);
    }

    #[test]
    fn timestamp_ordering_works() {
        let ts1 = Timestamp::from_unix_secs(100);
        let ts2 = Timestamp::from_unix_secs(200);

        assert!(ts1 < ts2);
        assert!(ts2 > ts1);
    }
}
