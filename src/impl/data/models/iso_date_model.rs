use std::str::FromStr;

use chrono::{DateTime, FixedOffset, NaiveDate};
use fractic_server_error::ServerError;

use crate::{domain::logic::utils::local_calendar_date, errors::InvalidIsoDate};

/// Plain ISO date (`2024-03-01`) or full RFC 3339 timestamp
/// (`2024-03-01T18:45:00.000Z`), as sent by the API.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum ISODateModel {
    Date(NaiveDate),
    Timestamp(DateTime<FixedOffset>),
}

impl FromStr for ISODateModel {
    type Err = ServerError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return Ok(ISODateModel::Date(d));
        }
        DateTime::parse_from_rfc3339(s)
            .map(ISODateModel::Timestamp)
            .map_err(|e| InvalidIsoDate::with_debug(s, &e))
    }
}

impl ISODateModel {
    /// Local calendar day. Plain dates are taken as-is.
    pub(crate) fn local_date(&self, offset: FixedOffset) -> NaiveDate {
        match self {
            ISODateModel::Date(d) => *d,
            ISODateModel::Timestamp(ts) => local_calendar_date(*ts, offset),
        }
    }
}
