//! Utilities for parsing and formatting RFC 3339 timestamps.
//!
//! The [`Timestamp`] newtype wraps `time::OffsetDateTime`.
//!
//! # Formatting
//! ```
//! # use gateway_model::model::id::GuildId;
//! # use gateway_model::model::Timestamp;
//! #
//! let timestamp: Timestamp = GuildId::new(175928847299117063).created_at();
//! assert_eq!(timestamp.unix_timestamp(), 1462015105);
//! assert_eq!(timestamp.to_string(), "2016-04-30T11:18:25.796Z");
//! ```
//!
//! # Parsing RFC 3339 string
//! ```
//! # use gateway_model::model::Timestamp;
//! #
//! let timestamp = Timestamp::parse("2016-04-30T11:18:25Z").unwrap();
//! let timestamp = Timestamp::parse("2016-04-30T11:18:25+00:00").unwrap();
//! let timestamp = Timestamp::parse("2016-04-30T11:18:25.796Z").unwrap();
//!
//! let timestamp: Timestamp = "2016-04-30T11:18:25Z".parse().unwrap();
//!
//! assert!(Timestamp::parse("2016-04-30T11:18:25").is_err());
//! assert!(Timestamp::parse("2016-04-30T11:18").is_err());
//! ```

use std::fmt;
use std::str::FromStr;

use dep_time::error::Parse as InnerError;
use dep_time::format_description::well_known::Rfc3339;
use dep_time::serde::rfc3339;
use dep_time::{Duration, OffsetDateTime};
use serde::{Deserialize, Serialize};

/// The platform's epoch starts at "2015-01-01T00:00:00+00:00".
pub(crate) const EPOCH_MILLIS: u64 = 1_420_070_400_000;

/// Representation of a point in time, as carried by gateway payloads.
///
/// The struct implements the `std::fmt::Display` trait to format the underlying type as an RFC
/// 3339 date and string such as `2016-04-30T11:18:25.796Z`.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Deserialize, Serialize, Ord, PartialOrd)]
#[serde(transparent)]
pub struct Timestamp(#[serde(with = "rfc3339")] OffsetDateTime);

impl Timestamp {
    pub(crate) fn from_snowflake(id: u64) -> Timestamp {
        let ns = Duration::milliseconds(((id >> 22) + EPOCH_MILLIS) as i64).whole_nanoseconds();
        // `(u64::MAX >> 22) + EPOCH_MILLIS` lands in 2154, well inside the supported range.
        Self(OffsetDateTime::from_unix_timestamp_nanos(ns).unwrap_or(OffsetDateTime::UNIX_EPOCH))
    }

    /// Create a new `Timestamp` with the current date and time in UTC.
    #[must_use]
    pub fn now() -> Self {
        Self(OffsetDateTime::now_utc())
    }

    /// Create a new `Timestamp` from a UNIX timestamp.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the value is outside the range `time` can represent.
    pub fn from_unix_timestamp(secs: i64) -> Result<Self, InvalidTimestamp> {
        let dt = OffsetDateTime::from_unix_timestamp(secs).map_err(|_| InvalidTimestamp)?;
        Ok(Self(dt))
    }

    /// Returns the number of non-leap seconds since January 1, 1970 0:00:00 UTC
    #[must_use]
    pub fn unix_timestamp(&self) -> i64 {
        self.0.unix_timestamp()
    }

    /// Parse a timestamp from an RFC 3339 date and time string.
    ///
    /// The offset is required, either as `Z` or as `+hh:mm`.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the string is not a valid RFC 3339 date and time string.
    pub fn parse(input: &str) -> Result<Timestamp, ParseError> {
        OffsetDateTime::parse(input, &Rfc3339).map(Self).map_err(ParseError)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.0.format(&Rfc3339).map_err(|_| fmt::Error)?;
        f.write_str(&s)
    }
}

impl std::ops::Deref for Timestamp {
    type Target = OffsetDateTime;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<OffsetDateTime> for Timestamp {
    fn from(dt: OffsetDateTime) -> Self {
        Self(dt)
    }
}

impl FromStr for Timestamp {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Timestamp::parse(s)
    }
}

#[derive(Debug)]
pub struct InvalidTimestamp;

impl std::error::Error for InvalidTimestamp {}

impl fmt::Display for InvalidTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid UNIX timestamp value")
    }
}

/// Signifies the failure to parse the `Timestamp` from an RFC 3339 string.
#[derive(Debug)]
pub struct ParseError(InnerError);

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::Timestamp;

    #[test]
    fn from_unix_timestamp() {
        let timestamp = Timestamp::from_unix_timestamp(1462015105).unwrap();
        assert_eq!(timestamp.unix_timestamp(), 1462015105);
        assert_eq!(timestamp.to_string(), "2016-04-30T11:18:25Z");
    }

    #[test]
    fn display_parses_back() {
        for input in ["2021-03-04T05:06:07.123+00:00", "2021-03-04T05:06:07+02:00"] {
            let timestamp = Timestamp::parse(input).unwrap();
            assert_eq!(Timestamp::parse(&timestamp.to_string()).unwrap(), timestamp);
        }
    }

    #[test]
    fn snowflake_epoch() {
        assert_eq!(Timestamp::from_snowflake(0).unix_timestamp(), 1_420_070_400);
    }
}
