//! Validation and coercion of raw `{ts, val}` entries into [`Sample`]s
//!
//! The API is loosely typed: numbers sometimes arrive as strings, and the odd
//! entry is garbage. Everything is checked here, at the boundary, so the rest
//! of the system only ever sees finite values and positive timestamps.

use serde_json::Value;
use shared_types::Sample;
use std::fmt;

/// Timestamps below this are before 2001 in epoch ms
const SMALL_TIMESTAMP_MS: i64 = 1_000_000_000;

/// Timestamps above this are after the year 2286 in epoch ms
const LARGE_TIMESTAMP_MS: i64 = 9_999_999_999_999;

/// Values above this look like a timestamp ended up in `val`
const TIMESTAMP_LIKE_VALUE: f64 = 1_000_000_000_000.0;

/// Largest f64 that still converts to i64 without saturating
const MAX_TIMESTAMP_F64: f64 = 9_007_199_254_740_992.0; // 2^53

/// Why a raw entry was dropped
#[derive(Debug, Clone, PartialEq)]
pub enum SampleRejection {
    NotAnObject(String),
    MissingTimestamp,
    InvalidTimestamp(String),
    NonPositiveTimestamp(f64),
    FractionalTimestamp(f64),
    OutOfRangeTimestamp(f64),
    MissingValue,
    InvalidValue(String),
}

impl fmt::Display for SampleRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SampleRejection::NotAnObject(kind) => write!(f, "entry is {kind}, not an object"),
            SampleRejection::MissingTimestamp => write!(f, "missing ts"),
            SampleRejection::InvalidTimestamp(raw) => write!(f, "invalid timestamp {raw}"),
            SampleRejection::NonPositiveTimestamp(ts) => write!(f, "non-positive timestamp {ts}"),
            SampleRejection::FractionalTimestamp(ts) => write!(f, "fractional timestamp {ts}"),
            SampleRejection::OutOfRangeTimestamp(ts) => write!(f, "timestamp {ts} out of range"),
            SampleRejection::MissingValue => write!(f, "missing val"),
            SampleRejection::InvalidValue(raw) => write!(f, "invalid value {raw}"),
        }
    }
}

/// Name of a JSON value's kind, for diagnostics
pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Numbers pass through; strings are accepted when they parse cleanly.
fn coerce_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    number.is_finite().then_some(number)
}

/// Turn one raw API entry into a [`Sample`], or say why not.
pub fn parse_sample(raw: &Value) -> Result<Sample, SampleRejection> {
    let fields = raw
        .as_object()
        .ok_or_else(|| SampleRejection::NotAnObject(json_kind(raw).to_string()))?;

    let raw_ts = fields.get("ts").ok_or(SampleRejection::MissingTimestamp)?;
    let ts = coerce_number(raw_ts)
        .ok_or_else(|| SampleRejection::InvalidTimestamp(raw_ts.to_string()))?;
    if ts <= 0.0 {
        return Err(SampleRejection::NonPositiveTimestamp(ts));
    }
    if ts > MAX_TIMESTAMP_F64 {
        return Err(SampleRejection::OutOfRangeTimestamp(ts));
    }
    if ts.fract() != 0.0 {
        return Err(SampleRejection::FractionalTimestamp(ts));
    }
    let timestamp = ts as i64;

    let raw_val = fields.get("val").ok_or(SampleRejection::MissingValue)?;
    let value =
        coerce_number(raw_val).ok_or_else(|| SampleRejection::InvalidValue(raw_val.to_string()))?;

    Ok(Sample::new(timestamp, value))
}

/// Log the plausibility warnings for an accepted sample. Never rejects.
pub fn warn_if_suspicious(tag: &str, sample: &Sample) {
    if sample.timestamp < SMALL_TIMESTAMP_MS {
        log::warn!(
            "Suspiciously small timestamp for {tag}: {} (value {})",
            sample.timestamp,
            sample.value
        );
    }
    if sample.timestamp > LARGE_TIMESTAMP_MS {
        log::warn!(
            "Suspiciously large timestamp for {tag}: {} (value {})",
            sample.timestamp,
            sample.value
        );
    }
    if sample.value > TIMESTAMP_LIKE_VALUE {
        log::warn!(
            "Value looks like timestamp for {tag}: {} (ts {})",
            sample.value,
            sample.timestamp
        );
    }
}
