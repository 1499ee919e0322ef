//! Timestamp utilities.
//!
//! All timestamps in the system are Unix milliseconds in UTC. The chat
//! clients render them in their own locale, so the server never deals in
//! local time.

use chrono::{DateTime, SecondsFormat, Utc};

/// Current Unix timestamp in milliseconds (UTC).
pub fn get_utc_timestamp() -> i64 {
    Utc::now().timestamp_millis()
}

/// Convert a Unix millisecond timestamp to an RFC 3339 string (UTC, `Z`).
///
/// Out-of-range timestamps fall back to the epoch rather than panicking;
/// they can only come from a corrupted store row.
pub fn timestamp_to_rfc3339(timestamp_millis: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(timestamp_millis)
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}
