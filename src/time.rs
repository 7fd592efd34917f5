// ABOUTME: Codec for the server's fixed UTC timestamp wire format
// ABOUTME: Converts between chrono timestamps and `YYYY-MM-DD HH:MM:SS UTC` strings
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};

use crate::errors::{Error, Result};

/// The server's timestamp wire format. Second precision, always UTC.
pub const SERVER_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

/// Render a timestamp in the server's wire format.
///
/// The input is normalized to UTC first; sub-second precision is not
/// representable in the format and is dropped.
#[must_use]
pub fn to_server_time<Tz: TimeZone>(time: &DateTime<Tz>) -> String {
    time.with_timezone(&Utc)
        .format(SERVER_TIME_FORMAT)
        .to_string()
}

/// Parse a timestamp in the server's wire format into a UTC-tagged time.
///
/// # Errors
///
/// Returns [`Error::InvalidTimestamp`] when the input does not match
/// `YYYY-MM-DD HH:MM:SS UTC` exactly.
pub fn from_server_time(value: &str) -> Result<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(value, SERVER_TIME_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|source| Error::InvalidTimestamp {
            value: value.to_owned(),
            source,
        })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use chrono::{FixedOffset, TimeZone};

    use super::*;

    #[test]
    fn round_trip_is_exact_to_the_second() {
        let time = Utc.with_ymd_and_hms(2020, 1, 1, 12, 34, 56).unwrap();
        assert_eq!(from_server_time(&to_server_time(&time)).unwrap(), time);
    }

    #[test]
    fn encode_normalizes_to_utc() {
        let offset = FixedOffset::east_opt(2 * 3600).unwrap();
        let local = offset.with_ymd_and_hms(2020, 6, 1, 14, 0, 0).unwrap();
        assert_eq!(to_server_time(&local), "2020-06-01 12:00:00 UTC");
    }

    #[test]
    fn encode_drops_subsecond_precision() {
        let time = Utc.timestamp_opt(1_577_836_800, 123_456_789).unwrap();
        assert_eq!(to_server_time(&time), "2020-01-01 00:00:00 UTC");
    }

    #[test]
    fn decode_parses_utc_tagged() {
        let time = from_server_time("2020-01-01 00:00:00 UTC").unwrap();
        assert_eq!(time, Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn decode_rejects_other_formats() {
        assert!(from_server_time("2020-01-01T00:00:00Z").is_err());
        assert!(from_server_time("").is_err());
    }
}
