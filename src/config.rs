//! Command-line configuration.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use url::Url;

use subtrack::{Error, Result, TrackFormat};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Srt,
    Vtt,
}

impl From<OutputFormat> for TrackFormat {
    fn from(f: OutputFormat) -> TrackFormat {
        match f {
            OutputFormat::Srt => TrackFormat::Srt,
            OutputFormat::Vtt => TrackFormat::Vtt,
        }
    }
}

/// Convert subtitle files between SRT and WebVTT.
#[derive(Parser, Debug, Clone)]
#[command(name = "subtrack")]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Subtitle files or http(s) URLs (.srt, .vtt or .json).
    pub inputs: Vec<String>,

    /// Output directory.
    #[arg(short = 'd', long = "dir")]
    pub work_dir: Option<PathBuf>,

    /// Output format.
    #[arg(short, long, value_enum, default_value = "srt")]
    pub format: OutputFormat,

    /// Print parsed tracks as JSON instead of writing files.
    #[arg(long)]
    pub json: bool,

    /// Proxy for remote inputs.
    #[arg(long)]
    pub proxy: Option<String>,

    /// Logging level (trace, debug, info, warn, error).
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.inputs.is_empty() {
            return Err(Error::InvalidInput("at least one input is required".to_string()));
        }

        if let Some(proxy) = &self.proxy {
            let url = Url::parse(proxy)?;
            if !matches!(url.scheme(), "http" | "https") {
                return Err(Error::InvalidInput(format!(
                    "unsupported proxy scheme: {}",
                    url.scheme()
                )));
            }
        }
        Ok(())
    }

    pub fn output_format(&self) -> TrackFormat {
        self.format.into()
    }

    pub fn work_dir(&self) -> Result<PathBuf> {
        match &self.work_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(std::env::current_dir()?),
        }
    }
}
