// Domain rules - Stream keep/discard policy

use serde::Serialize;
use tracing::debug;

use crate::domain::errors::DomainError;
use crate::domain::model::{StreamInfo, StreamKind};
use crate::utils::percentage;

/// Audio profile that qualifies a track for lossless-to-lossy conversion
pub const LOSSLESS_PROFILE: &str = "DTS-HD MA";

/// Removable bytes below which a discard-only rewrite is not worth doing (100 MiB)
pub const MIN_SAVINGS_BYTES: u64 = 100 * 1024 * 1024;

/// Keep/discard policy for one batch
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionPolicy {
    languages: Vec<String>,
    convert_lossless: bool,
}

impl SelectionPolicy {
    /// Create a policy; the language list must not be empty
    pub fn new(languages: Vec<String>, convert_lossless: bool) -> Result<Self, DomainError> {
        let languages: Vec<String> = languages
            .into_iter()
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty())
            .collect();
        if languages.is_empty() {
            return Err(DomainError::BadArgs(
                "At least one language to keep is required".to_string(),
            ));
        }
        Ok(Self {
            languages,
            convert_lossless,
        })
    }

    pub fn languages(&self) -> &[String] {
        &self.languages
    }

    pub fn convert_lossless(&self) -> bool {
        self.convert_lossless
    }

    /// Decide keep/discard for every classified stream of one file.
    ///
    /// `streams` must be sorted by index. `untagged` lists the indexes that
    /// were skipped by classification; they take no part in the accounting.
    pub fn select(&self, streams: &[StreamInfo], untagged: &[u32]) -> SelectionResult {
        let primary_audio = streams.iter().find(|s| s.is_audio());
        let primary_audio_index = primary_audio.map(|s| s.index);
        let primary_audio_language = primary_audio.and_then(|s| s.language.clone());

        // The primary track is tested against the configured languages plus its
        // own; every other audio or subtitle track against the configured ones.
        let primary_keep = KeepSet::new(&self.languages, primary_audio_language.as_deref());
        let configured_keep = KeepSet::new(&self.languages, None);

        let mut result = SelectionResult {
            primary_audio_language: primary_audio_language.clone(),
            untagged_indexes: untagged.to_vec(),
            ..Default::default()
        };

        for stream in streams {
            let keep = match stream.kind {
                StreamKind::Video | StreamKind::Other => true,
                StreamKind::Audio if Some(stream.index) == primary_audio_index => {
                    primary_keep.contains(stream.language.as_deref())
                }
                StreamKind::Audio | StreamKind::Subtitle => {
                    configured_keep.contains(stream.language.as_deref())
                }
            };

            if keep {
                result.bytes_kept += stream.size_bytes;
                if stream.kind == StreamKind::Video && result.primary_video.is_none() {
                    result.primary_video = Some(stream.index);
                } else {
                    result.kept_indexes.push(stream.index);
                }
            } else {
                debug!(index = stream.index, kind = %stream.kind, language = ?stream.language, "discarding stream");
                result.bytes_removed += stream.size_bytes;
                result.discarded_indexes.push(stream.index);
            }

            result.decisions.push(StreamDecision {
                stream: stream.clone(),
                keep,
            });
        }

        if self.convert_lossless {
            let source = primary_audio
                .filter(|s| result.is_kept(s.index))
                .filter(|s| s.codec_profile.as_deref() == Some(LOSSLESS_PROFILE))
                .filter(|_| !has_truehd(streams))
                .map(|s| s.index);
            result.conversion_source = source;
        }

        result
    }
}

/// Whether any audio stream already carries a TrueHD track
pub fn has_truehd(streams: &[StreamInfo]) -> bool {
    streams.iter().filter(|s| s.is_audio()).any(|s| {
        s.codec_profile
            .as_deref()
            .is_some_and(|p| p.to_lowercase().contains("truehd"))
    })
}

/// Language membership test; a missing language never matches
struct KeepSet<'a> {
    languages: &'a [String],
    extra: Option<&'a str>,
}

impl<'a> KeepSet<'a> {
    fn new(languages: &'a [String], extra: Option<&'a str>) -> Self {
        Self { languages, extra }
    }

    fn contains(&self, language: Option<&str>) -> bool {
        match language {
            Some(lang) => self.extra == Some(lang) || self.languages.iter().any(|l| l == lang),
            None => false,
        }
    }
}

/// Keep decision for one stream
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StreamDecision {
    #[serde(flatten)]
    pub stream: StreamInfo,
    pub keep: bool,
}

/// Outcome of applying a [`SelectionPolicy`] to one file
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SelectionResult {
    pub decisions: Vec<StreamDecision>,
    pub bytes_removed: u64,
    pub bytes_kept: u64,
    /// First video stream, mapped before everything else
    pub primary_video: Option<u32>,
    /// Kept streams other than the primary video, ascending
    pub kept_indexes: Vec<u32>,
    pub discarded_indexes: Vec<u32>,
    /// Streams without tags; not classified, passed through untouched
    pub untagged_indexes: Vec<u32>,
    /// Audio stream to transcode, when conversion applies
    pub conversion_source: Option<u32>,
    pub primary_audio_language: Option<String>,
}

impl SelectionResult {
    /// Nothing to discard and nothing to convert
    pub fn is_noop(&self) -> bool {
        self.discarded_indexes.is_empty() && self.conversion_source.is_none()
    }

    pub fn is_kept(&self, index: u32) -> bool {
        self.decisions
            .iter()
            .any(|d| d.stream.index == index && d.keep)
    }

    /// Whether rewriting the file pays off. A planned conversion always does;
    /// discards alone must free at least [`MIN_SAVINGS_BYTES`].
    pub fn worth_changing(&self) -> bool {
        self.conversion_source.is_some() || self.bytes_removed >= MIN_SAVINGS_BYTES
    }

    /// Share of classified bytes that would be removed, in percent
    pub fn percent_saved(&self) -> f64 {
        percentage(self.bytes_removed, self.bytes_removed + self.bytes_kept)
    }
}
