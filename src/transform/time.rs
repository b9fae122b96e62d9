//! Timestamp, offset and duration conversions

use crate::error::{Error, Result};
use chrono::{DateTime, Duration, NaiveDate, SecondsFormat, Utc};

/// Parse a signed `±HH:MM` offset into a signed duration.
///
/// The sign is mandatory.
pub fn parse_offset(offset: &str) -> Result<Duration> {
    let invalid = || Error::timestamp(format!("invalid UTC offset '{offset}', expected ±HH:MM"));

    let (sign, rest) = if let Some(rest) = offset.strip_prefix('+') {
        (1, rest)
    } else if let Some(rest) = offset.strip_prefix('-') {
        (-1, rest)
    } else {
        return Err(invalid());
    };

    let (hours, minutes) = rest.split_once(':').ok_or_else(invalid)?;
    let two_digits = |s: &str| s.len() == 2 && s.bytes().all(|b| b.is_ascii_digit());
    if !two_digits(hours) || !two_digits(minutes) {
        return Err(invalid());
    }
    let hours: i64 = hours.parse().map_err(|_| invalid())?;
    let minutes: i64 = minutes.parse().map_err(|_| invalid())?;
    if !(0..24).contains(&hours) || !(0..60).contains(&minutes) {
        return Err(invalid());
    }

    Ok((Duration::hours(hours) + Duration::minutes(minutes)) * sign)
}

/// Shift `timestamp` by the local `offset` and render the result in UTC.
///
/// A `+` offset is subtracted and a `-` offset is added. The output keeps the
/// sub-second precision of the input and always ends in `+00:00`.
///
/// ```
/// use personal_sync::transform::adjust_timezone;
///
/// let utc = adjust_timezone("2022-04-24T02:25:44.774Z", "-05:00").unwrap();
/// assert_eq!(utc, "2022-04-24T07:25:44.774+00:00");
/// ```
pub fn adjust_timezone(timestamp: &str, offset: &str) -> Result<String> {
    let parsed = DateTime::parse_from_rfc3339(timestamp)
        .map_err(|e| Error::timestamp(format!("'{timestamp}': {e}")))?;
    let shift = parse_offset(offset)?;

    let adjusted = parsed.with_timezone(&Utc) - shift;
    Ok(adjusted.to_rfc3339_opts(SecondsFormat::AutoSi, false))
}

/// Milliseconds to whole seconds, truncating the remainder.
pub fn millis_to_seconds(millis: i64) -> i64 {
    millis / 1000
}

/// Inclusive range of calendar days
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Create a range, rejecting `start > end`
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(Error::invalid_config(
                "start_date",
                format!("start date {start} is after end date {end}"),
            ));
        }
        Ok(Self { start, end })
    }

    /// `today - days ..= today`
    pub fn last_days(today: NaiveDate, days: u32) -> Self {
        Self {
            start: today - Duration::days(i64::from(days)),
            end: today,
        }
    }

    /// Build a range from optional `YYYY-MM-DD` strings.
    ///
    /// A missing end defaults to `today`; a missing start to `default_days`
    /// before the end.
    pub fn parse(
        start: Option<&str>,
        end: Option<&str>,
        today: NaiveDate,
        default_days: u32,
    ) -> Result<Self> {
        let end = match end {
            Some(s) => parse_date("end_date", s)?,
            None => today,
        };
        let start = match start {
            Some(s) => parse_date("start_date", s)?,
            None => end - Duration::days(i64::from(default_days)),
        };
        Self::new(start, end)
    }

    /// First instant of the range, `%Y-%m-%dT00:00:00Z`
    pub fn start_param(&self) -> String {
        format!("{}T00:00:00Z", self.start.format("%Y-%m-%d"))
    }

    /// Last second of the range, `%Y-%m-%dT23:59:59Z`
    pub fn end_param(&self) -> String {
        format!("{}T23:59:59Z", self.end.format("%Y-%m-%d"))
    }
}

fn parse_date(field: &str, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| Error::invalid_config(field, format!("'{value}': {e}")))
}
