//! Per-file tables and the batch savings summary

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::app::FileOutcome;
use crate::domain::errors::DomainError;
use crate::domain::model::StreamKind;
use crate::domain::rules::{SelectionResult, MIN_SAVINGS_BYTES};
use crate::planner::mapping::CONVERSION_TITLE;
use crate::planner::RemuxPlan;
use crate::utils::{format_bytes, parse_ac, replace_audio_names};

const SEPARATOR_WIDTH: usize = 80;
const REMOVE_MARKER: &str = "<-remove";
const CONVERT_MARKER: &str = "<-convert";

/// Stream table, savings line and command for one file that will change
pub fn render_file_block(path: &Path, selection: &SelectionResult, plan: &RemuxPlan) -> String {
    let mut lines = vec![
        String::new(),
        "-".repeat(SEPARATOR_WIDTH),
        format!("File: {}", path.display()),
        format!("index\t{:<10}\tlang\tsize", "type"),
    ];

    for decision in &selection.decisions {
        let stream = &decision.stream;
        let (name, channels) = match stream.kind {
            StreamKind::Audio => (
                replace_audio_names(stream.codec_profile.as_deref().unwrap_or("audio")),
                parse_ac(stream.channel_count),
            ),
            kind => (kind.as_str().to_string(), String::new()),
        };
        let language = match stream.kind {
            StreamKind::Video => "-",
            _ => stream.language.as_deref().unwrap_or("-"),
        };
        let marker = if !decision.keep {
            REMOVE_MARKER
        } else if selection.conversion_source == Some(stream.index) {
            CONVERT_MARKER
        } else {
            ""
        };
        let row = format!(
            "{}\t{:<10}{}\t{}\t{:<10}{}",
            stream.index,
            name,
            channels,
            language,
            format_bytes(stream.size_bytes),
            marker
        );
        lines.push(row.trim_end().to_string());
    }

    lines.push(format!(
        "Space to save: {} ({:.2}%)",
        format_bytes(selection.bytes_removed),
        selection.percent_saved()
    ));
    if plan.converts {
        lines.push(format!(
            "A new {} track will be created and set as default.",
            CONVERSION_TITLE
        ));
    }
    let underline = lines.last().map_or(0, |l| l.chars().count());
    lines.push("-".repeat(underline));
    lines.push(plan.render());
    join_lines(lines)
}

/// State of a file that was selected for rewriting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeStatus {
    /// Dry run; command printed only
    Planned,
    Done,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChangedFile {
    pub path: PathBuf,
    pub bytes_saved: u64,
    pub percent_saved: f64,
    pub converted: bool,
    pub command: String,
    pub status: ChangeStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub bytes_saved: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailedFile {
    pub path: PathBuf,
    pub error: String,
}

/// Cross-file summary of one batch
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchReport {
    pub executed: bool,
    pub languages: Vec<String>,
    pub changed: Vec<ChangedFile>,
    pub below_threshold: Vec<SkippedFile>,
    pub unchanged: usize,
    pub failures: Vec<FailedFile>,
    pub total_bytes_saved: u64,
}

impl BatchReport {
    pub fn new(executed: bool, languages: &[String]) -> Self {
        Self {
            executed,
            languages: languages.to_vec(),
            ..Default::default()
        }
    }

    /// Add the outcome of one processed file
    pub fn record(&mut self, path: &Path, outcome: &FileOutcome) {
        match outcome {
            FileOutcome::NoChange { .. } => self.unchanged += 1,
            FileOutcome::BelowThreshold { selection, .. } => {
                self.below_threshold.push(SkippedFile {
                    path: path.to_path_buf(),
                    bytes_saved: selection.bytes_removed,
                });
            }
            FileOutcome::Planned {
                selection,
                plan,
                execution,
            } => {
                let (status, error) = match execution {
                    None => (ChangeStatus::Planned, None),
                    Some(Ok(_)) => (ChangeStatus::Done, None),
                    Some(Err(e)) => (ChangeStatus::Failed, Some(e.to_string())),
                };
                if status != ChangeStatus::Failed {
                    self.total_bytes_saved += selection.bytes_removed;
                }
                self.changed.push(ChangedFile {
                    path: path.to_path_buf(),
                    bytes_saved: selection.bytes_removed,
                    percent_saved: selection.percent_saved(),
                    converted: plan.converts,
                    command: plan.render(),
                    status,
                    error,
                });
            }
        }
    }

    /// Add a file that could not be processed. A file without streams has
    /// nothing to do and counts as unchanged.
    pub fn record_error(&mut self, path: &Path, error: &DomainError) {
        match error {
            DomainError::NoStreamsFound { .. } => self.unchanged += 1,
            other => self.failures.push(FailedFile {
                path: path.to_path_buf(),
                error: other.to_string(),
            }),
        }
    }

    /// Any planned rewrite failed while executing
    pub fn execution_failed(&self) -> bool {
        self.changed.iter().any(|c| c.status == ChangeStatus::Failed)
    }

    /// Changed files, smallest saving first
    pub fn breakdown(&self) -> Vec<&ChangedFile> {
        let mut entries: Vec<&ChangedFile> = self.changed.iter().collect();
        entries.sort_by_key(|c| c.bytes_saved);
        entries
    }

    pub fn render_text(&self) -> String {
        let mut lines = Vec::new();

        if self.changed.is_empty() {
            lines.push("No files needed thinning".to_string());
        } else {
            for entry in self.breakdown() {
                let note = match entry.status {
                    ChangeStatus::Failed => " (failed)",
                    _ if entry.converted => " (+TrueHD)",
                    _ => "",
                };
                lines.push(format!(
                    "{:<10} : {}{}",
                    format_bytes(entry.bytes_saved),
                    file_name(&entry.path),
                    note
                ));
            }
            let label = if self.executed {
                "Total Space Saved"
            } else {
                "Total saveable space"
            };
            lines.push(String::new());
            lines.push(format!("{} : {}", label, format_bytes(self.total_bytes_saved)));
        }

        if !self.below_threshold.is_empty() {
            lines.push(String::new());
            lines.push(format!(
                "Skipped, less than {} to save:",
                format_bytes(MIN_SAVINGS_BYTES)
            ));
            let mut skipped: Vec<&SkippedFile> = self.below_threshold.iter().collect();
            skipped.sort_by_key(|s| s.bytes_saved);
            lines.extend(skipped.into_iter().map(|entry| {
                format!("{:<10} : {}", format_bytes(entry.bytes_saved), file_name(&entry.path))
            }));
        }

        let failed: Vec<String> = self
            .changed
            .iter()
            .filter_map(|c| c.error.as_deref().map(|e| (c.path.as_path(), e)))
            .chain(self.failures.iter().map(|f| (f.path.as_path(), f.error.as_str())))
            .map(|(path, error)| format!("{}: {}", path.display(), error))
            .collect();
        if !failed.is_empty() {
            lines.push(String::new());
            lines.push("Errors:".to_string());
            lines.extend(failed);
        }

        join_lines(lines)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }
}

/// One line per entry, each terminated by a newline
fn join_lines(lines: Vec<String>) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
