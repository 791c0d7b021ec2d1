//! SubRip scanner and serializer.

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::cc::{Cue, Track, TrackFormat};
use crate::text;
use crate::time::parse_srt_timestamp;

static BLOCK_SEP_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{2,}").unwrap());
static INDEX_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+$").unwrap());
static TIMING_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]{2}:[0-9]{2}:[0-9]{2},[0-9]{3})\s+-->\s+([0-9]{2}:[0-9]{2}:[0-9]{2},[0-9]{3})$").unwrap()
});

/// Parse a SubRip document. Blocks without a valid timing line are skipped,
/// so this never fails.
pub fn parse_srt(input: &str) -> Track {
    let src = text::normalize(input);
    let mut track = Track::new(TrackFormat::Srt);

    for (n, block) in BLOCK_SEP_RE.split(&src).enumerate() {
        let lines: Vec<&str> = block
            .split('\n')
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        if lines.len() < 2 {
            continue;
        }

        // [index], timing, text...
        let timing_idx = if INDEX_RE.is_match(lines[0]) { 1 } else { 0 };

        match parse_timing(lines[timing_idx]) {
            Some((start, end)) => track.cues.push(Cue::new(
                start,
                end,
                lines[timing_idx + 1..].join("\n"),
            )),
            None => debug!("skipping srt block {} without valid timing", n + 1),
        }
    }

    track
}

/// Render a track as SubRip. Cues are renumbered from 1 and ids dropped.
pub fn serialize_srt(track: &Track) -> String {
    let mut out = String::new();

    for (i, cue) in track.cues.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&format!("{}\n{}\n{}\n", i + 1, cue.srt_timing(), cue.text));
    }

    out
}

fn parse_timing(line: &str) -> Option<(i64, i64)> {
    let caps = TIMING_RE.captures(line)?;
    let start = parse_srt_timestamp(&caps[1]).ok()?;
    let end = parse_srt_timestamp(&caps[2]).ok()?;
    Some((start, end))
}
