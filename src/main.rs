use std::fs;
use std::io;
use std::path::Path;
use std::process;

use clap::Parser;
use log::{error, info};

use subtrack::cc::{self, Formatter, Subtitle};
use subtrack::{http, lookup};

mod config;

use config::Config;

fn init_logger(level: &str) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn main() {
    let config = Config::parse();
    init_logger(&config.log_level);

    if let Err(e) = config.validate() {
        eprintln!("{}", e);
        process::exit(1);
    }

    if let Err(e) = http::init_client(config.proxy.as_deref()) {
        eprintln!("{}", e);
        process::exit(1);
    }

    let subtitles: Vec<Subtitle> = config
        .inputs
        .iter()
        .filter_map(|input| match lookup::lookup(input) {
            Ok(subtitle) => Some(subtitle),
            Err(e) => {
                error!("fail to lookup {}. cause: {}", input, e);
                None
            }
        })
        .collect();

    if subtitles.is_empty() {
        return;
    }

    if config.json {
        let tracks: Vec<&subtrack::Track> = subtitles.iter().map(|s| &s.track).collect();
        if let Err(e) = serde_json::to_writer_pretty(io::stdout().lock(), &tracks) {
            eprintln!("{}", e);
            process::exit(1);
        }
        println!();
        return;
    }

    let mut work_dir = match config.work_dir() {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };
    if !work_dir.exists() {
        if let Err(e) = fs::create_dir_all(&work_dir) {
            eprintln!("{}", e);
            process::exit(1);
        }
    }

    let formatter = cc::formatter(config.output_format());
    for subtitle in subtitles {
        work_dir.push(format!("{}.{}", subtitle.name, formatter.ext()));
        match write_subtitle_to_file(&work_dir, &subtitle, formatter.as_ref()) {
            Ok(()) => {
                info!("wrote {} cues", subtitle.track.cues.len());
                println!("{}", work_dir.display());
            }
            Err(e) => error!("fail to write {}. cause: {}", work_dir.display(), e),
        }
        work_dir.pop();
    }
}

fn write_subtitle_to_file(file_path: &Path, subtitle: &Subtitle, formatter: &dyn Formatter) -> io::Result<()> {
    let mut file = fs::File::create(file_path)?;
    formatter.write(&mut file, &subtitle.track)?;
    Ok(())
}
