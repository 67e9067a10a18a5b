//! Command-line argument value types

use clap::ValueEnum;

/// Format of the batch summary written to stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ReportFormat {
    /// Per-file tables and a savings breakdown
    #[default]
    Text,
    Json,
    Yaml,
}
