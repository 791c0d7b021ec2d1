//! WebVTT scanner and serializer.

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::cc::{Cue, Track, TrackFormat};
use crate::error::ParseError;
use crate::settings::{parse_cue_settings, serialize_cue_settings, CueSettings};
use crate::text;
use crate::time::parse_vtt_timestamp;

static HEADER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^WEBVTT(?:[ \t].*)?$").unwrap());
static NOTE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^NOTE(?:$|\s)").unwrap());
static TIMING_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^\s*((?:[0-9]{2}:)?[0-9]{2}:[0-9]{2}\.[0-9]{3})\s+-->\s+((?:[0-9]{2}:)?[0-9]{2}:[0-9]{2}\.[0-9]{3})(?:\s+(.*?))?\s*$",
    )
    .unwrap()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Header,
    Metadata,
    Body,
}

struct Timing {
    start: i64,
    end: i64,
    settings: Option<CueSettings>,
}

/// Parse a WebVTT document.
///
/// Fails only when the first line is not a `WEBVTT` header. Malformed blocks
/// after the header are skipped.
pub fn parse_vtt(input: &str) -> Result<Track, ParseError> {
    let src = text::normalize(input);
    let lines: Vec<&str> = src.split('\n').collect();
    let mut scanner = Scanner {
        lines: &lines,
        pos: 0,
        cues: Vec::new(),
    };

    let mut state = State::Header;
    loop {
        state = match state {
            State::Header => {
                scanner.header()?;
                State::Metadata
            }
            State::Metadata => {
                scanner.skip_metadata();
                State::Body
            }
            State::Body => {
                scanner.body();
                break;
            }
        };
    }

    Ok(Track {
        cues: scanner.cues,
        format: TrackFormat::Vtt,
    })
}

/// Render a track as WebVTT. Cue settings are written in canonical order.
pub fn serialize_vtt(track: &Track) -> String {
    let mut out = String::from("WEBVTT\n\n");

    for (i, cue) in track.cues.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        if let Some(id) = cue.id.as_deref().filter(|id| !id.is_empty()) {
            out.push_str(id);
            out.push('\n');
        }
        out.push_str(&cue.vtt_timing());
        if let Some(settings) = &cue.settings {
            let settings = serialize_cue_settings(settings);
            if !settings.is_empty() {
                out.push(' ');
                out.push_str(&settings);
            }
        }
        out.push('\n');
        out.push_str(&cue.text);
        out.push('\n');
    }

    out
}

struct Scanner<'a> {
    lines: &'a [&'a str],
    pos: usize,
    cues: Vec<Cue>,
}

impl<'a> Scanner<'a> {
    fn line(&self, i: usize) -> Option<&'a str> {
        self.lines.get(i).copied()
    }

    fn is_blank(&self, i: usize) -> bool {
        self.line(i).map_or(false, |l| l.trim().is_empty())
    }

    fn header(&mut self) -> Result<(), ParseError> {
        let first = self.line(0).unwrap_or("").trim();
        if !HEADER_RE.is_match(first) {
            return Err(ParseError::InvalidHeader);
        }
        self.pos = 1;
        Ok(())
    }

    fn skip_metadata(&mut self) {
        while self.pos < self.lines.len() && !self.is_blank(self.pos) {
            self.pos += 1;
        }
        if self.line(self.pos) == Some("") {
            self.pos += 1;
        }
    }

    fn body(&mut self) {
        while self.pos < self.lines.len() {
            while self.is_blank(self.pos) {
                self.pos += 1;
            }
            let Some(line) = self.line(self.pos) else {
                break;
            };

            if NOTE_RE.is_match(line) || line == "STYLE" || line == "REGION" {
                self.skip_block();
                continue;
            }

            let (id, timing_idx) = match parse_timing(line) {
                Some(_) => (None, self.pos),
                None => (Some(line.trim().to_string()), self.pos + 1),
            };

            let Some(timing) = self.line(timing_idx).and_then(parse_timing) else {
                debug!("skipping malformed vtt block at line {}", self.pos + 1);
                self.pos += 1;
                continue;
            };

            let mut j = timing_idx + 1;
            let mut text_lines: Vec<&str> = Vec::new();
            while let Some(l) = self.line(j).filter(|l| !l.trim().is_empty()) {
                text_lines.push(l);
                j += 1;
            }

            self.cues.push(Cue {
                id,
                start: timing.start,
                end: timing.end,
                text: text_lines.join("\n"),
                settings: timing.settings,
            });
            self.pos = j + 1;
        }
    }

    // NOTE, STYLE and REGION bodies run to the next blank line.
    fn skip_block(&mut self) {
        self.pos += 1;
        while self.pos < self.lines.len() && !self.is_blank(self.pos) {
            self.pos += 1;
        }
        self.pos += 1;
    }
}

fn parse_timing(line: &str) -> Option<Timing> {
    let caps = TIMING_RE.captures(line)?;
    let start = parse_vtt_timestamp(&caps[1]).ok()?;
    let end = parse_vtt_timestamp(&caps[2]).ok()?;
    let settings = caps
        .get(3)
        .and_then(|m| parse_cue_settings(m.as_str().split_whitespace()));
    Some(Timing {
        start,
        end,
        settings,
    })
}
