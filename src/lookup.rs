use std::fs;
use std::path::Path;

use log::info;
use url::Url;

use crate::cc::{Subtitle, Track};
use crate::error::{Error, Result};
use crate::http;

/// Decode subtitle text: a serialized [`Track`] when `is_json`, otherwise an
/// SRT or WebVTT document picked by format detection.
pub fn decode_subtitle(name: &str, content: &str, is_json: bool) -> Result<Subtitle> {
    let track: Track = if is_json {
        serde_json::from_str(content)?
    } else {
        crate::parse(content)?
    };
    info!("{}: {} {} cues", name, track.cues.len(), track.format);

    Ok(Subtitle {
        name: name.to_string(),
        track,
    })
}

pub fn lookup_file(path: &Path) -> Result<Subtitle> {
    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| Error::InvalidInput(format!("no file name in {}", path.display())))?;
    let is_json = path
        .extension()
        .map_or(false, |ext| ext.eq_ignore_ascii_case("json"));

    let content = fs::read_to_string(path)?;
    decode_subtitle(name, &content, is_json)
}

pub fn lookup_url(url: &Url) -> Result<Subtitle> {
    let file_name = url
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| Error::InvalidInput(format!("url path required: {}", url)))?;

    let (name, is_json) = match file_name.rfind('.') {
        Some(p) => (&file_name[..p], file_name[p + 1..].eq_ignore_ascii_case("json")),
        None => (file_name, false),
    };

    let content = http::simple_http_get(url)?;
    decode_subtitle(name, &content, is_json)
}

/// Resolve a command-line input: http(s) URLs are fetched, anything else is
/// read from disk.
pub fn lookup(input: &str) -> Result<Subtitle> {
    match Url::parse(input) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => lookup_url(&url),
        _ => lookup_file(Path::new(input)),
    }
}
