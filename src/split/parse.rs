//! Duration and Timestamp Parsing
//!
//! Turns the textual forms used on the command line and in API requests
//! into millisecond values for the chunker.
//!
//! # Durations
//!
//! ```text
//! 250          raw milliseconds
//! 250ms
//! 10s
//! 1m30s        components are summed
//! 2h, 7d, 1w
//! ```
//!
//! # Timestamps
//!
//! ```text
//! 1644156603000            epoch milliseconds
//! now, now-15m             relative to the current time
//! 2022-02-06T14:10:03Z     RFC 3339
//! 2022-02-06T14:10:03      naive, read as UTC
//! 2022-02-06               midnight UTC
//! ```

use std::sync::OnceLock;

use chrono::Utc;
use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::digit1,
    combinator::{all_consuming, map_res, value},
    multi::many1,
    sequence::pair,
    IResult,
};
use regex::Regex;

use crate::split::error::{SplitError, SplitResult};

/// Parse a duration string into milliseconds
pub fn parse_duration(input: &str) -> SplitResult<i64> {
    let s = input.trim();

    if s.is_empty() {
        return Err(SplitError::InvalidDuration(input.to_string()));
    }

    if s.bytes().all(|b| b.is_ascii_digit()) {
        return s
            .parse::<i64>()
            .map_err(|_| SplitError::Overflow(input.to_string()));
    }

    let (_, parts) = all_consuming(many1(duration_component))(s)
        .map_err(|_| SplitError::InvalidDuration(input.to_string()))?;

    parts
        .into_iter()
        .try_fold(0i64, |total, (amount, unit_ms)| {
            amount.checked_mul(unit_ms)?.checked_add(total)
        })
        .ok_or_else(|| SplitError::Overflow(input.to_string()))
}

/// Parse one `<amount><unit>` component
fn duration_component(input: &str) -> IResult<&str, (i64, i64)> {
    pair(map_res(digit1, str::parse::<i64>), duration_unit)(input)
}

/// Parse a unit suffix into its size in milliseconds
fn duration_unit(input: &str) -> IResult<&str, i64> {
    alt((
        value(1, tag("ms")),
        value(1_000, tag("s")),
        value(60_000, tag("m")),
        value(3_600_000, tag("h")),
        value(86_400_000, tag("d")),
        value(604_800_000, tag("w")),
    ))(input)
}

/// Parse a timestamp string into epoch milliseconds
pub fn parse_timestamp(input: &str) -> SplitResult<i64> {
    parse_timestamp_at(input, Utc::now().timestamp_millis())
}

/// Parse a timestamp string, resolving relative forms against `now`
pub fn parse_timestamp_at(input: &str, now: i64) -> SplitResult<i64> {
    let s = input.trim();

    if let Ok(ts) = s.parse::<i64>() {
        return Ok(ts);
    }

    if s.starts_with("now") {
        return parse_relative_time(s, now);
    }

    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(s) {
        return Ok(dt.timestamp_millis());
    }

    if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Ok(dt.and_utc().timestamp_millis());
    }

    if let Ok(date) = chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        if let Some(dt) = date.and_hms_opt(0, 0, 0) {
            return Ok(dt.and_utc().timestamp_millis());
        }
    }

    Err(SplitError::InvalidTimestamp(input.to_string()))
}

/// Parse relative time like "now-7d"
fn parse_relative_time(s: &str, now: i64) -> SplitResult<i64> {
    if s == "now" {
        return Ok(now);
    }

    let caps = relative_time_pattern()?
        .captures(s)
        .ok_or_else(|| SplitError::InvalidTimestamp(s.to_string()))?;

    let offset = parse_duration(&caps[1])?;
    now.checked_sub(offset)
        .ok_or_else(|| SplitError::Overflow(s.to_string()))
}

/// Compiled once and shared by every `now-<duration>` lookup
fn relative_time_pattern() -> SplitResult<&'static Regex> {
    static PATTERN: OnceLock<Result<Regex, regex::Error>> = OnceLock::new();

    PATTERN
        .get_or_init(|| Regex::new(r"^now\s*-\s*(\S+)$"))
        .as_ref()
        .map_err(|e| SplitError::InvalidTimestamp(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_duration_units() {
        assert_eq!(parse_duration("250").unwrap(), 250);
        assert_eq!(parse_duration("250ms").unwrap(), 250);
        assert_eq!(parse_duration("10s").unwrap(), 10_000);
        assert_eq!(parse_duration("5m").unwrap(), 300_000);
        assert_eq!(parse_duration("2h").unwrap(), 7_200_000);
        assert_eq!(parse_duration("1d").unwrap(), 86_400_000);
        assert_eq!(parse_duration("1w").unwrap(), 604_800_000);
    }

    #[test]
    fn test_parse_duration_compound() {
        assert_eq!(parse_duration("1m30s").unwrap(), 90_000);
        assert_eq!(parse_duration(" 1h5m500ms ").unwrap(), 3_900_500);
    }

    #[test]
    fn test_parse_duration_invalid() {
        assert!(matches!(parse_duration(""), Err(SplitError::InvalidDuration(_))));
        assert!(matches!(parse_duration("10x"), Err(SplitError::InvalidDuration(_))));
        assert!(matches!(parse_duration("s"), Err(SplitError::InvalidDuration(_))));
        assert!(matches!(parse_duration("-5s"), Err(SplitError::InvalidDuration(_))));
        assert!(matches!(
            parse_duration("999999999999999w"),
            Err(SplitError::Overflow(_))
        ));
    }

    #[test]
    fn test_parse_timestamp_formats() {
        assert_eq!(parse_timestamp("1644156603000").unwrap(), 1_644_156_603_000);
        assert_eq!(
            parse_timestamp("2022-02-06T14:10:03Z").unwrap(),
            1_644_156_603_000
        );
        assert_eq!(
            parse_timestamp("2022-02-06T14:10:03").unwrap(),
            1_644_156_603_000
        );
        assert_eq!(parse_timestamp("2022-02-06").unwrap(), 1_644_105_600_000);
    }

    #[test]
    fn test_parse_relative_time() {
        let now = 1_644_156_603_000;

        assert_eq!(parse_timestamp_at("now", now).unwrap(), now);
        assert_eq!(parse_timestamp_at("now-15m", now).unwrap(), now - 900_000);
        assert_eq!(parse_timestamp_at("now - 1h30m", now).unwrap(), now - 5_400_000);
        assert!(parse_timestamp_at("now+5m", now).is_err());
    }

    #[test]
    fn test_relative_time_pattern_is_reused() {
        let first = relative_time_pattern().unwrap();
        let second = relative_time_pattern().unwrap();
        assert!(std::ptr::eq(first, second));

        let now = 1_644_156_603_000;
        for minutes in 1..=5 {
            let input = format!("now-{}m", minutes);
            assert_eq!(
                parse_timestamp_at(&input, now).unwrap(),
                now - minutes * 60_000
            );
        }
    }

    #[test]
    fn test_parse_timestamp_invalid() {
        assert!(matches!(
            parse_timestamp("yesterday-ish"),
            Err(SplitError::InvalidTimestamp(_))
        ));
    }
}
