// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Timestamp codec for the leaderboard API.
//!
//! The upstream API encodes times as `YYYY-MM-DDTHH:MM:SS±HHMM`. A missing
//! value is sent as `null` (either JSON null or the literal string), which
//! maps to [`Timestamp::ZERO`]. Newer payloads use integer Unix seconds
//! instead; the serde decoder accepts both.

use chrono::{DateTime, FixedOffset, Utc};
use serde::de::{self, Deserialize, Deserializer, Visitor};
use std::fmt;

/// Fixed-offset layout used by the upstream API.
pub const TIME_LAYOUT: &str = "%Y-%m-%dT%H:%M:%S%z";

const NULL_SENTINEL: &str = "null";

/// Length of a `YYYY-MM-DDTHH:MM:SS±HHMM` timestamp.
const LAYOUT_LEN: usize = 24;

/// A point in time, or the zero sentinel.
///
/// The zero sentinel orders before every real timestamp, so it never wins a
/// `max` against one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(Option<DateTime<FixedOffset>>);

impl Timestamp {
    /// The "never" value.
    pub const ZERO: Timestamp = Timestamp(None);

    /// Current wall-clock time.
    pub fn now() -> Self {
        Self(Some(Utc::now().fixed_offset()))
    }

    /// Build from Unix seconds. `0` and out-of-range values give the zero sentinel.
    pub fn from_unix(secs: i64) -> Self {
        if secs == 0 {
            return Self::ZERO;
        }
        DateTime::<Utc>::from_timestamp(secs, 0)
            .map(|dt| Self(Some(dt.fixed_offset())))
            .unwrap_or(Self::ZERO)
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_none()
    }

    pub fn as_datetime(&self) -> Option<DateTime<FixedOffset>> {
        self.0
    }
}

impl From<DateTime<FixedOffset>> for Timestamp {
    fn from(dt: DateTime<FixedOffset>) -> Self {
        Self(Some(dt))
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(Some(dt.fixed_offset()))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format(*self))
    }
}

/// Parse an API timestamp.
///
/// `"null"` yields [`Timestamp::ZERO`]; anything else must match [`TIME_LAYOUT`].
pub fn parse(text: &str) -> Result<Timestamp, TimestampError> {
    if text == NULL_SENTINEL {
        return Ok(Timestamp::ZERO);
    }
    check_shape(text).map_err(|reason| TimestampError::Malformed {
        text: text.to_string(),
        reason: reason.to_string(),
    })?;
    DateTime::parse_from_str(text, TIME_LAYOUT)
        .map(Timestamp::from)
        .map_err(|e| TimestampError::Malformed {
            text: text.to_string(),
            reason: e.to_string(),
        })
}

/// chrono's `%z` and numeric fields accept more than the API emits (colons in
/// the offset, unpadded fields, signed years), so the byte layout is checked
/// first.
fn check_shape(text: &str) -> Result<(), &'static str> {
    let bytes = text.as_bytes();
    if bytes.len() != LAYOUT_LEN {
        return Err("wrong length");
    }
    for (i, &b) in bytes.iter().enumerate() {
        let ok = match i {
            4 | 7 => b == b'-',
            10 => b == b'T',
            13 | 16 => b == b':',
            19 => b == b'+' || b == b'-',
            _ => b.is_ascii_digit(),
        };
        if !ok {
            return Err("does not match YYYY-MM-DDTHH:MM:SS±HHMM");
        }
    }
    Ok(())
}

/// Format a timestamp in the API layout, keeping its original offset.
///
/// The zero sentinel formats as `"null"`.
pub fn format(ts: Timestamp) -> String {
    match ts.0 {
        Some(dt) => dt.format(TIME_LAYOUT).to_string(),
        None => NULL_SENTINEL.to_string(),
    }
}

/// Parse, falling back to the zero sentinel on malformed input.
fn parse_or_zero(text: &str) -> Timestamp {
    parse(text).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Ignoring malformed timestamp");
        Timestamp::ZERO
    })
}

/// Timestamp codec errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimestampError {
    #[error("Malformed timestamp {text:?}: {reason}")]
    Malformed { text: String, reason: String },
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(TimestampVisitor)
    }
}

struct TimestampVisitor;

impl<'de> Visitor<'de> for TimestampVisitor {
    type Value = Timestamp;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a timestamp string, Unix seconds, or null")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Timestamp, E> {
        Ok(parse_or_zero(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Timestamp, E> {
        Ok(Timestamp::from_unix(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Timestamp, E> {
        Ok(i64::try_from(v)
            .map(Timestamp::from_unix)
            .unwrap_or(Timestamp::ZERO))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Timestamp, E> {
        Ok(Timestamp::ZERO)
    }

    fn visit_none<E: de::Error>(self) -> Result<Timestamp, E> {
        Ok(Timestamp::ZERO)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Timestamp, D::Error> {
        deserializer.deserialize_any(TimestampVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fixed_offset() {
        let ts = parse("2018-12-01T05:00:00-0500").unwrap();
        let expected = DateTime::parse_from_rfc3339("2018-12-01T10:00:00Z").unwrap();
        assert_eq!(ts.as_datetime(), Some(expected));
        assert!(!ts.is_zero());
    }

    #[test]
    fn test_parse_null_sentinel() {
        assert_eq!(parse("null"), Ok(Timestamp::ZERO));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for text in [
            "",
            "NULL",
            "yesterday",
            "2018-12-01 05:00:00",
            "2018-12-01T05:00:00",
            "2018-12-01T05:00:00-05:00",
            "2018-1-1T5:0:0-0500",
            "2018-12-01T05:00:00 -0500",
            "+2018-12-01T05:00:00-0500",
            "2018-12-01T05:00:00.5-0500",
            "2018-13-01T05:00:00-0500",
        ] {
            let err = parse(text).unwrap_err();
            assert!(
                matches!(err, TimestampError::Malformed { text: ref t, .. } if t == text),
                "expected Malformed for {:?}",
                text
            );
        }
    }

    #[test]
    fn test_round_trip_keeps_offset() {
        for text in [
            "2018-12-01T05:00:00-0500",
            "2023-12-24T23:59:59+0100",
            "2020-02-29T00:00:01+0000",
        ] {
            let parsed = parse(text).unwrap();
            assert_eq!(format(parsed), text);
            assert_eq!(parse(&format(parsed)).unwrap(), parsed);
        }
    }

    #[test]
    fn test_zero_formats_as_null() {
        assert_eq!(format(Timestamp::ZERO), "null");
        assert_eq!(Timestamp::ZERO.to_string(), "null");
    }

    #[test]
    fn test_zero_orders_before_everything() {
        let early = Timestamp::from_unix(1);
        assert!(Timestamp::ZERO < early);
        assert!(early < Timestamp::now());
    }

    #[test]
    fn test_ordering_ignores_offset() {
        let a = parse("2018-12-01T05:00:00-0500").unwrap();
        let b = parse("2018-12-01T11:00:00+0100").unwrap();
        assert_eq!(a, b);
        assert!(parse("2018-12-01T05:00:01-0500").unwrap() > b);
    }

    #[test]
    fn test_from_unix_zero_is_sentinel() {
        assert!(Timestamp::from_unix(0).is_zero());
        assert_eq!(
            format(Timestamp::from_unix(1_543_640_400)),
            "2018-12-01T05:00:00+0000"
        );
    }

    #[test]
    fn test_deserialize_variants() {
        let ts: Timestamp = serde_json::from_str("\"2018-12-01T05:00:00-0500\"").unwrap();
        assert_eq!(ts, parse("2018-12-01T05:00:00-0500").unwrap());

        let ts: Timestamp = serde_json::from_str("1543640400").unwrap();
        assert_eq!(ts, parse("2018-12-01T05:00:00+0000").unwrap());

        let ts: Timestamp = serde_json::from_str("null").unwrap();
        assert!(ts.is_zero());

        let ts: Timestamp = serde_json::from_str("\"null\"").unwrap();
        assert!(ts.is_zero());
    }

    #[test]
    fn test_deserialize_malformed_falls_back_to_zero() {
        let ts: Timestamp = serde_json::from_str("\"not a time\"").unwrap();
        assert!(ts.is_zero());
    }
}
