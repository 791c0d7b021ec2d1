//! Millisecond timestamp codec for SRT (`HH:MM:SS,mmm`) and WebVTT
//! (`[HH:]MM:SS.mmm`).

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::cc::TrackFormat;
use crate::error::ParseError;

static SRT_TIMESTAMP_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]{2}):([0-9]{2}):([0-9]{2}),([0-9]{3})$").unwrap());
static VTT_TIMESTAMP_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:([0-9]{2}):)?([0-9]{2}):([0-9]{2})\.([0-9]{3})$").unwrap());

const MS_PER_HOUR: i64 = 3_600_000;
const MS_PER_MINUTE: i64 = 60_000;
const MS_PER_SECOND: i64 = 1000;

pub fn format_srt_time(ms: i64) -> String {
    format_time(ms, ',')
}

pub fn format_vtt_time(ms: i64) -> String {
    format_time(ms, '.')
}

/// Parse `HH:MM:SS,mmm` into milliseconds.
///
/// Fields are only checked for their digit width, so `00:99:00,000` is
/// accepted as 99 minutes.
pub fn parse_srt_timestamp(input: &str) -> Result<i64, ParseError> {
    let caps = SRT_TIMESTAMP_RE
        .captures(input)
        .ok_or_else(|| invalid(TrackFormat::Srt, input))?;
    decode(&caps).ok_or_else(|| invalid(TrackFormat::Srt, input))
}

/// Parse `HH:MM:SS.mmm` or `MM:SS.mmm` into milliseconds.
pub fn parse_vtt_timestamp(input: &str) -> Result<i64, ParseError> {
    let caps = VTT_TIMESTAMP_RE
        .captures(input)
        .ok_or_else(|| invalid(TrackFormat::Vtt, input))?;
    decode(&caps).ok_or_else(|| invalid(TrackFormat::Vtt, input))
}

fn invalid(format: TrackFormat, input: &str) -> ParseError {
    ParseError::InvalidTimestamp {
        format,
        input: input.to_string(),
    }
}

fn decode(caps: &Captures) -> Option<i64> {
    // an absent hour group means zero; a present group must parse
    let field = |i: usize| match caps.get(i) {
        Some(m) => m.as_str().parse::<i64>().ok(),
        None => Some(0),
    };
    Some(((field(1)? * 60 + field(2)?) * 60 + field(3)?) * MS_PER_SECOND + field(4)?)
}

fn format_time(ms: i64, sep: char) -> String {
    let ms = ms.max(0);
    let hour = ms / MS_PER_HOUR;
    let minute = ms % MS_PER_HOUR / MS_PER_MINUTE;
    let second = ms % MS_PER_MINUTE / MS_PER_SECOND;
    let millis = ms % MS_PER_SECOND;
    format!("{:0>2}:{:0>2}:{:0>2}{}{:0>3}", hour, minute, second, sep, millis)
}
