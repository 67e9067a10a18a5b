//! thinmux
//!
//! Removes audio and subtitle tracks in unwanted languages from MKV/MP4 files
//! by remuxing them with ffmpeg, and optionally adds a TrueHD 5.1 track
//! converted from a DTS-HD MA primary track.
//!
//! # Usage
//!
//! ```bash
//! thinmux /media/movies                  # dry run, print the commands
//! thinmux -l eng,jpn --run movie.mkv     # rewrite in place
//! thinmux --convert-lossless --nodel /media/movies
//! ```

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing::{debug, info};

use thinmux::adapters::tracing_log::{self, LogSettings};
use thinmux::cli::{commands, Cli};
use thinmux::config_initialization::initialize_configuration;

/// Main entry point for the thinmux CLI application
#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Parse command line arguments
    let cli = Cli::parse();

    let (config, source) = initialize_configuration(&cli)?;

    // Initialize logging
    tracing_log::init(&LogSettings::new(&config.log_level, cli.debug, cli.log_json))?;

    match source {
        Some(path) => info!("Loaded configuration from {}", path.display()),
        None => debug!("No configuration file, using defaults"),
    }

    commands::run(&cli, config).await
}
