use thiserror::Error;

use crate::cc::TrackFormat;

/// Failures of the subtitle grammar itself.
///
/// Only header validation and the standalone timestamp parsers fail; any
/// other malformed content inside a file is skipped by the scanners.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("invalid vtt: missing WEBVTT header")]
    InvalidHeader,

    #[error("invalid {format} timestamp: {input}")]
    InvalidTimestamp { format: TrackFormat, input: String },
}

/// Errors raised while loading, fetching or writing subtitles.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("http request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),

    #[error("request {url} return {status}")]
    Status { url: String, status: u16 },

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, Error>;
