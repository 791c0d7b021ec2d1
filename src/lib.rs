//! Convert subtitle tracks between SubRip (SRT) and WebVTT.
//!
//! ```
//! let track = subtrack::parse("1\n00:00:01,000 --> 00:00:04,000\nHello world!").unwrap();
//! assert_eq!(
//!     subtrack::serialize_vtt(&track),
//!     "WEBVTT\n\n00:00:01.000 --> 00:00:04.000\nHello world!\n"
//! );
//! ```

pub mod cc;
pub mod detect;
pub mod error;
pub mod http;
pub mod lookup;
pub mod settings;
pub mod srt;
pub mod text;
pub mod time;
pub mod vtt;

pub use cc::{Cue, Track, TrackFormat};
pub use detect::detect_format;
pub use error::{Error, ParseError, Result};
pub use settings::{
    clamp0to100, parse_cue_settings, serialize_cue_settings, CueAlign, CueSettings, LineAlign,
    LinePosition, Position, PositionAlign, Vertical,
};
pub use srt::{parse_srt, serialize_srt};
pub use text::{normalize, strip_bom};
pub use time::{format_srt_time, format_vtt_time, parse_srt_timestamp, parse_vtt_timestamp};
pub use vtt::{parse_vtt, serialize_vtt};

/// Parse a document of either format, picking the parser with
/// [`detect_format`].
pub fn parse(input: &str) -> std::result::Result<Track, ParseError> {
    match detect_format(input) {
        TrackFormat::Vtt => parse_vtt(input),
        TrackFormat::Srt => Ok(parse_srt(input)),
    }
}
