use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, Utc};
use serde_json::Value;

const OFFSET_FORMATS: [&str; 3] = [
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
];
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];

/// Which end of a day an inclusive date bound snaps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayBound {
    /// 00:00:00 UTC.
    Start,
    /// 23:59:59 UTC.
    End,
}

/// Parses a loosely-typed timestamp value into a UTC instant.
///
/// Strings may be RFC 3339, naive date-times (taken as UTC) or bare dates.
/// Integers are epoch milliseconds. Everything else is `None`.
#[must_use]
pub fn parse_timestamp(value: Option<&Value>) -> Option<DateTime<Utc>> {
    match value? {
        Value::String(text) => parse_timestamp_str(text),
        Value::Number(number) => number
            .as_i64()
            .and_then(DateTime::<Utc>::from_timestamp_millis),
        _ => None,
    }
}

/// Parses timestamp text, see [`parse_timestamp`].
#[must_use]
pub fn parse_timestamp_str(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.with_timezone(&Utc));
    }

    if let Some(parsed) = OFFSET_FORMATS
        .iter()
        .find_map(|format| DateTime::parse_from_str(text, format).ok())
    {
        return Some(parsed.with_timezone(&Utc));
    }

    if let Some(parsed) = NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
    {
        return Some(parsed.and_utc());
    }

    parse_date(text).map(|date| date.and_time(NaiveTime::MIN).and_utc())
}

/// Formats an instant as ISO-8601 UTC with a `Z` suffix, empty for `None`.
#[must_use]
pub fn format_timestamp(timestamp: Option<DateTime<Utc>>) -> String {
    timestamp
        .map(|timestamp| timestamp.to_rfc3339_opts(SecondsFormat::AutoSi, true))
        .unwrap_or_default()
}

/// Converts user input into an inclusive ISO-8601 range bound.
///
/// `YYYY/MM/DD` and `YYYY-MM-DD` snap to the start or end of that UTC day.
/// Input containing `T` is taken as an exact instant. Unparseable input
/// yields no bound.
#[must_use]
pub fn range_bound(input: &str, bound: DayBound) -> Option<String> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if !input.contains('T')
        && let Some(date) = parse_date(input)
    {
        let time = match bound {
            DayBound::Start => NaiveTime::MIN,
            DayBound::End => NaiveTime::from_hms_opt(23, 59, 59)?,
        };
        return Some(format_timestamp(Some(date.and_time(time).and_utc())));
    }

    parse_timestamp_str(input).map(|instant| format_timestamp(Some(instant)))
}

fn parse_date(text: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
}
