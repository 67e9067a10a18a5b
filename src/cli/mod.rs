//! CLI module for thinmux
//!
//! This module handles command-line argument parsing and command execution.

use std::path::PathBuf;

use clap::builder::BoolishValueParser;
use clap::Parser;

pub mod args;
pub mod commands;

pub use args::ReportFormat;

/// thinmux - Strip unwanted audio and subtitle tracks from MKV/MP4 files
///
/// Prints the commands that would rewrite each file unless `--run` is given.
#[derive(Parser, Debug)]
#[command(name = "thinmux")]
#[command(about = "Remove audio and subtitle tracks in unwanted languages from video files")]
#[command(version)]
pub struct Cli {
    /// Files or directories to process; directories are searched recursively
    #[arg(required = true, value_name = "PATH")]
    pub paths: Vec<PathBuf>,

    /// Comma-separated languages to keep (default: eng)
    #[arg(short, long, value_delimiter = ',', env = "THINMUX_LANGUAGES")]
    pub languages: Option<Vec<String>>,

    /// Actually run the commands instead of printing them
    #[arg(long, env = "THINMUX_RUN", value_parser = BoolishValueParser::new())]
    pub run: bool,

    /// Add a TrueHD 5.1 track converted from a DTS-HD MA primary audio track
    #[arg(long, env = "THINMUX_CONVERT_LOSSLESS", value_parser = BoolishValueParser::new())]
    pub convert_lossless: bool,

    /// Keep <file>.original after a successful rewrite
    #[arg(long, env = "THINMUX_NODEL", value_parser = BoolishValueParser::new())]
    pub nodel: bool,

    /// ffprobe executable
    #[arg(long, env = "THINMUX_FFPROBE")]
    pub ffprobe: Option<String>,

    /// ffmpeg executable
    #[arg(long, env = "THINMUX_FFMPEG")]
    pub ffmpeg: Option<String>,

    /// Configuration file (default: ./thinmux.toml when present)
    #[arg(long, env = "THINMUX_CONFIG")]
    pub config: Option<PathBuf>,

    /// Summary format
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,

    /// Logging level
    #[arg(long)]
    pub log_level: Option<String>,

    /// Shorthand for --log-level debug
    #[arg(long)]
    pub debug: bool,

    /// Emit logs as JSON
    #[arg(long)]
    pub log_json: bool,
}
