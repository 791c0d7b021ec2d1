use once_cell::sync::Lazy;
use regex::Regex;

use crate::cc::TrackFormat;
use crate::text;

static SRT_TIMING_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:^|\n)[0-9]{2}:[0-9]{2}:[0-9]{2},[0-9]{3}\s+-->\s+[0-9]{2}:[0-9]{2}:[0-9]{2},[0-9]{3}").unwrap()
});

/// Guess the format of a subtitle document.
///
/// A `WEBVTT` prefix wins; otherwise any line starting with an SRT timing
/// means SRT. Anything else is reported as WebVTT.
pub fn detect_format(input: &str) -> TrackFormat {
    let src = text::strip_bom(input).trim_start();
    if src.starts_with("WEBVTT") {
        return TrackFormat::Vtt;
    }

    if SRT_TIMING_RE.is_match(src) {
        TrackFormat::Srt
    } else {
        TrackFormat::Vtt
    }
}
