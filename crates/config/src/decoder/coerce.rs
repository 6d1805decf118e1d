//! Type coercion of raw field values.
//!
//! Responsibilities:
//! - Turn raw text (or a list of texts) into a value of the field's kind.
//! - Parse compact duration literals and delimited lists.
//!
//! Invariants:
//! - List splitting preserves order and duplicates; `"a"` yields `["a"]`.
//! - Durations are never negative; a bare number other than `0` is rejected.

use std::time::Duration;

use crate::schema::{FieldKind, FieldMeta, FieldValue};

/// Raw value of a field before coercion.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Raw {
    Text(String),
    /// Elements of a sequence in the configuration source.
    Items(Vec<String>),
}

impl Raw {
    /// Text form of the raw value, for error messages.
    pub(crate) fn display(&self, delimiter: char) -> String {
        match self {
            Raw::Text(text) => text.clone(),
            Raw::Items(items) => items.join(&delimiter.to_string()),
        }
    }
}

pub(crate) fn coerce(meta: &FieldMeta, raw: Raw) -> Result<FieldValue, String> {
    let text = match (meta.kind, raw) {
        (FieldKind::StringList, Raw::Items(items)) => return Ok(FieldValue::StringList(items)),
        (FieldKind::StringList, Raw::Text(text)) => {
            return Ok(FieldValue::StringList(split_list(&text, meta.delimiter)));
        }
        (kind, Raw::Items(_)) => return Err(format!("expected a single {kind} value, got a list")),
        (_, Raw::Text(text)) => text,
    };

    match meta.kind {
        FieldKind::String => Ok(FieldValue::String(text)),
        FieldKind::Integer => text
            .trim()
            .parse::<i64>()
            .map(FieldValue::Integer)
            .map_err(|e| format!("invalid integer: {e}")),
        FieldKind::Boolean => parse_bool(&text)
            .map(FieldValue::Boolean)
            .ok_or_else(|| "expected a boolean (true/false, yes/no, on/off, 1/0)".to_string()),
        FieldKind::Duration => parse_duration(&text).map(FieldValue::Duration),
        FieldKind::Float => text
            .trim()
            .parse::<f64>()
            .map(FieldValue::Float)
            .map_err(|e| format!("invalid float: {e}")),
        FieldKind::StringList => unreachable!("list fields are handled above"),
        FieldKind::SectionList => Err("expected a list of sections".to_string()),
    }
}

/// Parse a boolean from a string.
pub fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Split `s` on `delimiter`, trimming each element.
///
/// An empty (or whitespace-only) input yields an empty list; otherwise the
/// number of elements is always one more than the number of delimiters.
pub fn split_list(s: &str, delimiter: char) -> Vec<String> {
    if s.trim().is_empty() {
        return Vec::new();
    }
    s.split(delimiter).map(|item| item.trim().to_string()).collect()
}

const UNITS: [(&str, f64); 7] = [
    ("ns", 1.0),
    ("us", 1e3),
    ("µs", 1e3),
    ("ms", 1e6),
    ("s", 1e9),
    ("m", 60e9),
    ("h", 3600e9),
];

/// Parse a compact duration literal such as `30s`, `250ms`, `1.5h` or `2h45m`.
pub fn parse_duration(input: &str) -> Result<Duration, String> {
    let s = input.trim();
    if s.is_empty() {
        return Err("empty duration".to_string());
    }
    if s.starts_with('-') {
        return Err(format!("negative duration {input:?} is not allowed"));
    }
    let s = s.strip_prefix('+').unwrap_or(s);
    if s == "0" {
        return Ok(Duration::ZERO);
    }

    let mut nanos = 0f64;
    let mut rest = s;
    while !rest.is_empty() {
        let number_len = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        if number_len == 0 {
            return Err(format!("invalid duration {input:?}"));
        }
        let (number, tail) = rest.split_at(number_len);
        let value: f64 = number
            .parse()
            .map_err(|_| format!("invalid number {number:?} in duration {input:?}"))?;

        let unit_len = tail
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(tail.len());
        let (unit, tail) = tail.split_at(unit_len);
        if unit.is_empty() {
            return Err(format!("missing unit in duration {input:?}"));
        }
        let scale = UNITS
            .iter()
            .find(|(name, _)| *name == unit)
            .map(|(_, scale)| *scale)
            .ok_or_else(|| format!("unknown unit {unit:?} in duration {input:?}"))?;

        nanos += value * scale;
        rest = tail;
    }

    if !nanos.is_finite() || nanos > u64::MAX as f64 {
        return Err(format!("duration {input:?} is too large"));
    }
    Ok(Duration::from_nanos(nanos.round() as u64))
}

/// Render `duration` as a compact literal accepted by [`parse_duration`].
///
/// Whole hours, minutes and seconds are combined (`1h30m`); sub-second
/// remainders use the largest exact unit (`250ms`, `1s500ms`). Zero is `0s`.
pub fn format_duration(duration: Duration) -> String {
    if duration.is_zero() {
        return "0s".to_string();
    }

    let secs = duration.as_secs();
    let (hours, minutes, seconds) = (secs / 3600, secs % 3600 / 60, secs % 60);
    let mut out = String::new();
    for (value, unit) in [(hours, "h"), (minutes, "m"), (seconds, "s")] {
        if value > 0 {
            out.push_str(&format!("{value}{unit}"));
        }
    }

    let nanos = duration.subsec_nanos();
    if nanos > 0 {
        let (value, unit) = if nanos % 1_000_000 == 0 {
            (nanos / 1_000_000, "ms")
        } else if nanos % 1_000 == 0 {
            (nanos / 1_000, "us")
        } else {
            (nanos, "ns")
        };
        out.push_str(&format!("{value}{unit}"));
    }
    out
}
