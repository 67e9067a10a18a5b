//! FFprobe adapter for media file probing
//!
//! Runs `ffprobe` as a child process and maps its JSON document onto
//! [`ProbeReport`]. Tag mappings keep their document order so that
//! "first matching tag" lookups behave the same as the probe output reads.

use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Map, Value};
use tokio::process::Command;
use tracing::{debug, trace};

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;

#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    #[serde(default)]
    format: Option<FfprobeFormat>,
    #[serde(default)]
    streams: Option<Vec<FfprobeStream>>,
}

#[derive(Debug, Default, Deserialize)]
struct FfprobeFormat {
    format_name: Option<String>,
    duration: Option<Value>,
    size: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct FfprobeStream {
    index: u32,
    codec_type: Option<String>,
    tags: Option<Map<String, Value>>,
    channels: Option<u32>,
    profile: Option<String>,
    codec_name: Option<String>,
    duration: Option<Value>,
    bit_rate: Option<Value>,
}

impl From<FfprobeStream> for RawStream {
    fn from(stream: FfprobeStream) -> Self {
        RawStream {
            index: stream.index,
            codec_type: stream.codec_type,
            tags: stream.tags.map(|tags| {
                tags.into_iter()
                    .filter_map(|(k, v)| value_to_string(&v).map(|v| (k, v)))
                    .collect()
            }),
            channels: stream.channels,
            profile: stream.profile,
            codec_name: stream.codec_name,
            duration: stream.duration.as_ref().and_then(value_to_string),
            bit_rate: stream.bit_rate.as_ref().and_then(value_to_string),
        }
    }
}

/// ffprobe reports numbers as strings; accept either
fn value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Parse an ffprobe `-print_format json -show_format -show_streams` document
pub fn parse_probe_output(path: &Path, json: &str) -> Result<ProbeReport, DomainError> {
    let file_name = path.display().to_string();
    let output: FfprobeOutput = serde_json::from_str(json)
        .map_err(|e| DomainError::probe(&file_name, format!("unparseable ffprobe output: {}", e)))?;

    let streams = output.streams.unwrap_or_default();
    if streams.is_empty() {
        return Err(DomainError::NoStreamsFound { path: file_name });
    }

    let format = output.format.unwrap_or_default();
    Ok(ProbeReport {
        path: file_name,
        format_name: format.format_name,
        duration: format
            .duration
            .as_ref()
            .and_then(value_to_string)
            .and_then(|d| d.parse().ok()),
        size: format
            .size
            .as_ref()
            .and_then(value_to_string)
            .and_then(|s| s.parse().ok()),
        streams: streams.into_iter().map(RawStream::from).collect(),
    })
}

/// FFprobe-based probe adapter
pub struct FfprobeAdapter {
    program: String,
}

impl FfprobeAdapter {
    /// Create new FFprobe adapter running `program`
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

#[async_trait]
impl ProbePort for FfprobeAdapter {
    async fn probe_media(&self, path: &Path) -> Result<ProbeReport, DomainError> {
        let file_name = path.display().to_string();
        debug!(program = %self.program, file = %file_name, "probing");

        let output = Command::new(&self.program)
            .args(["-v", "quiet", "-print_format", "json", "-show_format", "-show_streams"])
            .arg(path)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| DomainError::probe(&file_name, format!("failed to run {}: {}", self.program, e)))?;

        if !output.status.success() {
            return Err(DomainError::probe(
                &file_name,
                format!(
                    "{} exited with {}: {}",
                    self.program,
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            ));
        }

        let json = String::from_utf8(output.stdout)
            .map_err(|e| DomainError::probe(&file_name, format!("invalid UTF-8 in output: {}", e)))?;
        trace!(file = %file_name, "raw ffprobe output:\n{}", json);

        let report = parse_probe_output(path, &json)?;
        debug!(file = %file_name, streams = report.streams.len(), "probe complete");
        Ok(report)
    }
}
