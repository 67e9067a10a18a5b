// Tracing log adapter - Structured logging using tracing crate

use tracing_subscriber::EnvFilter;

use crate::domain::errors::*;

/// Logging options resolved from CLI and configuration
#[derive(Debug, Clone, PartialEq)]
pub struct LogSettings {
    pub level: String,
    pub json: bool,
}

impl LogSettings {
    /// `--debug` forces the debug level regardless of the configured one
    pub fn new(level: &str, debug: bool, json: bool) -> Self {
        Self {
            level: if debug { "debug".to_string() } else { level.to_lowercase() },
            json,
        }
    }

    /// `RUST_LOG` wins over the configured level when set
    fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level))
    }
}

/// Install the global subscriber. Logs go to stderr so stdout carries only the report.
pub fn init(settings: &LogSettings) -> Result<(), DomainError> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(settings.filter())
        .with_writer(std::io::stderr)
        .with_target(false);

    let result = if settings.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    result.map_err(|e| DomainError::ConfigError(format!("failed to initialise logging: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_flag_overrides_level() {
        assert_eq!(LogSettings::new("warn", true, false).level, "debug");
        assert_eq!(LogSettings::new("WARN", false, false).level, "warn");
    }
}
