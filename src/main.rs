//! Facial gesture detection driven by a stream of face-mesh landmarks.

use anyhow::{Context, Result};
use clap::Parser;
use facial_gestures::{
    actions::LoggingExecutor,
    app::GestureApp,
    config::{Config, EXAMPLE_CONFIG},
    landmark_source::{LandmarkSource, TextLandmarkSource},
};
use log::info;
use std::fs::File;
use std::io::{self, BufReader};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Landmark stream, one frame per line (reads stdin when omitted)
    #[arg(short, long)]
    input: Option<String>,

    /// Path to configuration file (YAML format)
    #[arg(short = 'C', long)]
    config: Option<String>,

    /// Override a named threshold, e.g. --set YAW_THRESHOLD=0.5
    #[arg(short = 's', long = "set", value_name = "NAME=VALUE")]
    overrides: Vec<String>,

    /// Write the example configuration to this path and exit
    #[arg(long, value_name = "PATH")]
    write_example_config: Option<String>,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.debug {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("debug"));
    } else {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    }

    if let Some(path) = &args.write_example_config {
        std::fs::write(path, EXAMPLE_CONFIG).with_context(|| format!("Failed to write {path}"))?;
        info!("Example configuration written to {}", path);
        return Ok(());
    }

    let mut config = if let Some(config_path) = &args.config {
        info!("Loading configuration from: {}", config_path);
        Config::from_file(config_path).with_context(|| format!("Failed to load config {config_path}"))?
    } else {
        Config::default()
    };

    for assignment in &args.overrides {
        config
            .apply_override(assignment)
            .with_context(|| format!("Invalid --set '{assignment}'"))?;
    }

    let source: Box<dyn LandmarkSource> = match &args.input {
        Some(path) => {
            info!("Reading landmarks from {}", path);
            let file = File::open(path).with_context(|| format!("Failed to open {path}"))?;
            Box::new(TextLandmarkSource::new(BufReader::new(file)))
        }
        None => {
            info!("Reading landmarks from stdin");
            Box::new(TextLandmarkSource::new(io::stdin().lock()))
        }
    };

    let executor = Box::new(LoggingExecutor::new(&config.actions));
    let mut app = GestureApp::new(&config, source, executor)?;
    let summary = app.run()?;
    info!("{:?}", summary);

    Ok(())
}
