// Domain models - Core types and data structures

use std::fmt;

use serde::Serialize;
use tracing::debug;

/// Tag key fragment that carries the per-stream byte count in Matroska statistics tags
pub const NUMBER_OF_BYTES_TAG: &str = "NUMBER_OF_BYTES";

/// Tag key holding the stream language
pub const LANGUAGE_TAG: &str = "language";

/// One stream record as reported by the probe tool, before classification
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawStream {
    pub index: u32,
    pub codec_type: Option<String>,
    /// Tag mapping in document order; `None` when the record has no `tags` key
    pub tags: Option<Vec<(String, String)>>,
    pub channels: Option<u32>,
    pub profile: Option<String>,
    pub codec_name: Option<String>,
    pub duration: Option<String>,
    pub bit_rate: Option<String>,
}

impl RawStream {
    /// Look up a tag by exact key
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags
            .as_ref()?
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// First tag whose key contains `fragment` (case-sensitive), in document order
    pub fn tag_containing(&self, fragment: &str) -> Option<(&str, &str)> {
        self.tags
            .as_ref()?
            .iter()
            .find(|(k, _)| k.contains(fragment))
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn has_tags(&self) -> bool {
        self.tags.as_ref().is_some_and(|tags| !tags.is_empty())
    }
}

/// Container-level probe result for one file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProbeReport {
    pub path: String,
    pub format_name: Option<String>,
    pub duration: Option<f64>,
    pub size: Option<u64>,
    pub streams: Vec<RawStream>,
}

/// Stream type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamKind {
    Video,
    Audio,
    Subtitle,
    Other,
}

impl StreamKind {
    /// Map the probe `codec_type` field; anything unrecognized is `Other`
    pub fn from_codec_type(codec_type: Option<&str>) -> Self {
        match codec_type {
            Some("video") => StreamKind::Video,
            Some("audio") => StreamKind::Audio,
            Some("subtitle") => StreamKind::Subtitle,
            _ => StreamKind::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StreamKind::Video => "video",
            StreamKind::Audio => "audio",
            StreamKind::Subtitle => "subtitle",
            StreamKind::Other => "other",
        }
    }
}

impl fmt::Display for StreamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified stream
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StreamInfo {
    pub index: u32,
    pub kind: StreamKind,
    /// Always `None` for video; absent metadata is also `None`
    pub language: Option<String>,
    pub size_bytes: u64,
    /// Audio only: profile, falling back to codec name
    pub codec_profile: Option<String>,
    /// Audio only, 0 otherwise
    pub channel_count: u32,
}

impl StreamInfo {
    /// Classify a raw record. Returns `None` for records without any tags;
    /// those are excluded from all accounting.
    pub fn classify(raw: &RawStream) -> Option<Self> {
        if !raw.has_tags() {
            debug!(index = raw.index, "stream has no tags, skipping");
            return None;
        }

        let kind = StreamKind::from_codec_type(raw.codec_type.as_deref());
        let language = match kind {
            StreamKind::Video => None,
            _ => raw.tag(LANGUAGE_TAG).map(str::to_string),
        };

        let (codec_profile, channel_count) = if kind == StreamKind::Audio {
            (
                raw.profile.clone().or_else(|| raw.codec_name.clone()),
                raw.channels.unwrap_or(0),
            )
        } else {
            (None, 0)
        };

        Some(Self {
            index: raw.index,
            kind,
            language,
            size_bytes: derive_size(raw),
            codec_profile,
            channel_count,
        })
    }

    pub fn is_audio(&self) -> bool {
        self.kind == StreamKind::Audio
    }
}

/// Estimate a stream's size: statistics tag, then duration * bit rate / 8, then zero
pub fn derive_size(raw: &RawStream) -> u64 {
    if let Some((key, value)) = raw.tag_containing(NUMBER_OF_BYTES_TAG) {
        match value.trim().parse::<u64>() {
            Ok(bytes) => return bytes,
            Err(_) => debug!(index = raw.index, key, value, "unparseable byte count tag"),
        }
    }

    let duration = raw.duration.as_deref().and_then(|d| d.trim().parse::<f64>().ok());
    let bit_rate = raw.bit_rate.as_deref().and_then(|b| b.trim().parse::<u64>().ok());
    match (duration, bit_rate) {
        (Some(duration), Some(bit_rate)) if duration.is_finite() && duration >= 0.0 => {
            (duration * bit_rate as f64 / 8.0) as u64
        }
        _ => {
            debug!(index = raw.index, "no size information, using 0");
            0
        }
    }
}

/// Classify every record of a probe report, dropping untagged ones.
/// Returns the classified streams and the indexes that were skipped.
pub fn classify_streams(report: &ProbeReport) -> (Vec<StreamInfo>, Vec<u32>) {
    let mut streams = Vec::with_capacity(report.streams.len());
    let mut untagged = Vec::new();
    for raw in &report.streams {
        match StreamInfo::classify(raw) {
            Some(info) => streams.push(info),
            None => untagged.push(raw.index),
        }
    }
    streams.sort_by_key(|s| s.index);
    untagged.sort_unstable();
    (streams, untagged)
}

#[cfg(test)]
mod tests;
