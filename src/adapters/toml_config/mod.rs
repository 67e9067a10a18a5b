// TOML config adapter - Configuration loaded from a `[thinmux]` table

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::errors::*;

/// Config file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "thinmux.toml";

/// Effective configuration for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThinConfig {
    /// Languages whose audio and subtitle tracks are kept
    pub languages: Vec<String>,
    /// Execute the remux plans instead of printing them
    pub run: bool,
    /// Add a TrueHD 5.1 track converted from a DTS-HD MA primary track
    pub convert_lossless: bool,
    /// Keep `<file>.original` after a successful remux
    pub keep_original: bool,
    pub ffprobe: String,
    pub ffmpeg: String,
    /// Container extensions picked up when scanning directories
    pub extensions: Vec<String>,
    pub log_level: String,
}

impl Default for ThinConfig {
    fn default() -> Self {
        Self {
            languages: vec!["eng".to_string()],
            run: false,
            convert_lossless: false,
            keep_original: false,
            ffprobe: "ffprobe".to_string(),
            ffmpeg: "ffmpeg".to_string(),
            extensions: vec!["mkv".to_string(), "mp4".to_string()],
            log_level: "info".to_string(),
        }
    }
}

impl ThinConfig {
    /// Check the values that have no sensible fallback
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.languages.iter().all(|l| l.trim().is_empty()) {
            return Err(DomainError::ConfigError(
                "at least one language to keep is required".to_string(),
            ));
        }
        if self.ffprobe.trim().is_empty() || self.ffmpeg.trim().is_empty() {
            return Err(DomainError::ConfigError(
                "ffprobe and ffmpeg paths must not be empty".to_string(),
            ));
        }
        if self.extensions.is_empty() {
            return Err(DomainError::ConfigError(
                "at least one container extension is required".to_string(),
            ));
        }
        match self.log_level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
            other => Err(DomainError::ConfigError(format!(
                "invalid log level: {}. Valid levels: trace, debug, info, warn, error",
                other
            ))),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    thinmux: ThinConfig,
}

/// TOML configuration adapter
#[derive(Debug, Default)]
pub struct TomlConfigAdapter;

impl TomlConfigAdapter {
    pub fn new() -> Self {
        Self
    }

    /// Load configuration from `explicit`, or from [`DEFAULT_CONFIG_FILE`] when
    /// present, or fall back to defaults. Returns the file actually read.
    pub fn load(&self, explicit: Option<&Path>) -> Result<(ThinConfig, Option<PathBuf>), DomainError> {
        let path = match explicit {
            Some(path) => {
                if !path.is_file() {
                    return Err(DomainError::ConfigError(format!(
                        "config file does not exist: {}",
                        path.display()
                    )));
                }
                path.to_path_buf()
            }
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !default.is_file() {
                    return Ok((ThinConfig::default(), None));
                }
                default
            }
        };

        let content = std::fs::read_to_string(&path).map_err(|e| {
            DomainError::ConfigError(format!("failed to read {}: {}", path.display(), e))
        })?;
        let config = Self::parse(&content)
            .map_err(|e| DomainError::ConfigError(format!("{}: {}", path.display(), e)))?;
        Ok((config, Some(path)))
    }

    /// Parse TOML content; missing keys take their defaults
    pub fn parse(content: &str) -> Result<ThinConfig, toml::de::Error> {
        let file: ConfigFile = toml::from_str(content)?;
        Ok(file.thinmux)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = ThinConfig::default();
        assert_eq!(config.languages, vec!["eng"]);
        assert!(!config.run);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_partial_table() {
        let config = TomlConfigAdapter::parse(
            r#"
            [thinmux]
            languages = ["eng", "pol"]
            convert_lossless = true
            ffmpeg = "/opt/ffmpeg/bin/ffmpeg"
            "#,
        )
        .unwrap();
        assert_eq!(config.languages, vec!["eng", "pol"]);
        assert!(config.convert_lossless);
        assert_eq!(config.ffmpeg, "/opt/ffmpeg/bin/ffmpeg");
        assert_eq!(config.ffprobe, "ffprobe");
        assert_eq!(config.extensions, vec!["mkv", "mp4"]);
    }

    #[test]
    fn test_parse_empty_file_is_default() {
        assert_eq!(TomlConfigAdapter::parse("").unwrap(), ThinConfig::default());
    }

    #[test]
    fn test_unknown_keys_rejected() {
        assert!(TomlConfigAdapter::parse("[thinmux]\nlanguage = \"eng\"\n").is_err());
    }

    #[test]
    fn test_validate() {
        let mut config = ThinConfig {
            languages: vec![" ".to_string()],
            ..Default::default()
        };
        assert!(config.validate().is_err());

        config.languages = vec!["eng".to_string()];
        config.log_level = "loud".to_string();
        assert!(config.validate().is_err());

        config.log_level = "DEBUG".to_string();
        config.extensions.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "[thinmux]\nkeep_original = true\n").unwrap();

        let (config, source) = TomlConfigAdapter::new().load(Some(&path)).unwrap();
        assert!(config.keep_original);
        assert_eq!(source, Some(path));
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let dir = TempDir::new().unwrap();
        let err = TomlConfigAdapter::new()
            .load(Some(&dir.path().join("absent.toml")))
            .unwrap_err();
        assert!(matches!(err, DomainError::ConfigError(_)));
    }
}
