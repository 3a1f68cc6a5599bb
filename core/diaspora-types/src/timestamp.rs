//! UTC timestamps as carried by federated entities.
//!
//! Every timestamp on the wire uses one representation,
//! [`TIMESTAMP_FORMAT`], with second precision. Sub-second components are
//! dropped when a timestamp is created so that a value always survives a
//! format/parse cycle unchanged.

use chrono::{DateTime, NaiveDateTime, SubsecRound, Utc};
use std::fmt;
use std::str::FromStr;

use crate::Error;

/// The canonical text form of a timestamp (`2016-03-14T09:26:53Z`).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// A UTC instant with second precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp at the current time.
    #[must_use]
    pub fn now() -> Self {
        Self::from_datetime(Utc::now())
    }

    /// Creates a timestamp from a chrono date, truncating sub-second precision.
    #[must_use]
    pub fn from_datetime(datetime: DateTime<Utc>) -> Self {
        Self(datetime.trunc_subsecs(0))
    }

    /// Creates a timestamp from seconds since the Unix epoch.
    pub fn from_unix(seconds: i64) -> crate::Result<Self> {
        DateTime::from_timestamp(seconds, 0)
            .map(Self)
            .ok_or_else(|| Error::InvalidTimestamp(format!("out of range: {seconds}")))
    }

    /// Parses the canonical representation.
    ///
    /// RFC 3339 input with an offset or fractional seconds is accepted as
    /// well and normalized to UTC seconds.
    pub fn parse(s: &str) -> crate::Result<Self> {
        let s = s.trim();
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT) {
            return Ok(Self(naive.and_utc()));
        }
        DateTime::parse_from_rfc3339(s)
            .map(|dt| Self::from_datetime(dt.with_timezone(&Utc)))
            .map_err(|e| Error::InvalidTimestamp(format!("{s}: {e}")))
    }

    /// Returns the underlying chrono value.
    #[must_use]
    pub const fn as_datetime(&self) -> DateTime<Utc> {
        self.0
    }

    /// Returns seconds since the Unix epoch.
    #[must_use]
    pub fn unix(&self) -> i64 {
        self.0.timestamp()
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(datetime: DateTime<Utc>) -> Self {
        Self::from_datetime(datetime)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(TIMESTAMP_FORMAT))
    }
}

impl FromStr for Timestamp {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
