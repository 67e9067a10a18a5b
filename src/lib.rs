//! thinmux library
//!
//! Probes video files with ffprobe, decides which audio and subtitle tracks to
//! keep by language and synthesizes the ffmpeg remux that drops the rest.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config_initialization;
pub mod domain;
pub mod output;
pub mod planner;
pub mod ports;
pub mod utils;

// Re-export commonly used types
pub use domain::errors::DomainError;
pub use domain::model::{StreamInfo, StreamKind};
pub use domain::rules::{SelectionPolicy, SelectionResult};
