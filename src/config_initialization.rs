//! Configuration initialization and hierarchy management

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::adapters::{ThinConfig, TomlConfigAdapter};
use crate::cli::Cli;

/// Resolve configuration following precedence: CLI > Env > File > Defaults.
///
/// Environment variables are folded into the CLI values by clap, so only the
/// file and the defaults are handled here. Returns the file that was read, if any.
pub fn initialize_configuration(cli: &Cli) -> Result<(ThinConfig, Option<PathBuf>)> {
    let (mut config, source) = TomlConfigAdapter::new()
        .load(cli.config.as_deref())
        .context("Failed to load configuration file")?;

    apply_cli_overrides(&mut config, cli);

    config.validate().context("Invalid configuration")?;
    Ok((config, source))
}

/// Apply command-line and environment overrides; a flag can only switch a setting on
fn apply_cli_overrides(config: &mut ThinConfig, cli: &Cli) {
    if let Some(languages) = &cli.languages {
        config.languages = languages
            .iter()
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty())
            .collect();
    }
    if let Some(ffprobe) = &cli.ffprobe {
        config.ffprobe = ffprobe.clone();
    }
    if let Some(ffmpeg) = &cli.ffmpeg {
        config.ffmpeg = ffmpeg.clone();
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    config.run |= cli.run;
    config.convert_lossless |= cli.convert_lossless;
    config.keep_original |= cli.nodel;
}
