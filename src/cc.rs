use std::fmt;
use std::io::{self, Write};

use serde::{Deserialize, Serialize};

use crate::settings::CueSettings;
use crate::{srt, time, vtt};

/// Subtitle formats understood by the parsers and serializers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackFormat {
    Srt,
    Vtt,
}

impl TrackFormat {
    pub fn ext(&self) -> &'static str {
        match self {
            TrackFormat::Srt => "srt",
            TrackFormat::Vtt => "vtt",
        }
    }
}

impl fmt::Display for TrackFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.ext())
    }
}

/// An ordered list of cues, in the order they appeared in the source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub cues: Vec<Cue>,
    pub format: TrackFormat,
}

impl Track {
    pub fn new(format: TrackFormat) -> Track {
        Track { cues: Vec::new(), format }
    }
}

/// One timed unit of a track. Times are milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub start: i64,
    pub end: i64,
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<CueSettings>,
}

impl Cue {
    pub fn new(start: i64, end: i64, text: impl Into<String>) -> Cue {
        Cue {
            id: None,
            start,
            end,
            text: text.into(),
            settings: None,
        }
    }

    pub fn srt_timing(&self) -> String {
        format!(
            "{} --> {}",
            time::format_srt_time(self.start),
            time::format_srt_time(self.end)
        )
    }

    pub fn vtt_timing(&self) -> String {
        format!(
            "{} --> {}",
            time::format_vtt_time(self.start),
            time::format_vtt_time(self.end)
        )
    }
}

/// A track together with the name it was loaded under.
#[derive(Debug, Clone, PartialEq)]
pub struct Subtitle {
    pub name: String,
    pub track: Track,
}

pub trait Formatter {
    fn ext(&self) -> &'static str;

    fn format(&self, track: &Track) -> String;

    fn write(&self, writer: &mut dyn Write, track: &Track) -> io::Result<()> {
        writer.write_all(self.format(track).as_bytes())
    }
}

pub struct Srt;

pub struct Vtt;

impl Formatter for Srt {
    fn ext(&self) -> &'static str {
        TrackFormat::Srt.ext()
    }

    fn format(&self, track: &Track) -> String {
        srt::serialize_srt(track)
    }
}

impl Formatter for Vtt {
    fn ext(&self) -> &'static str {
        TrackFormat::Vtt.ext()
    }

    fn format(&self, track: &Track) -> String {
        vtt::serialize_vtt(track)
    }
}

pub fn srt() -> Srt {
    Srt
}

pub fn vtt() -> Vtt {
    Vtt
}

pub fn formatter(format: TrackFormat) -> Box<dyn Formatter> {
    match format {
        TrackFormat::Srt => Box::new(srt()),
        TrackFormat::Vtt => Box::new(vtt()),
    }
}
