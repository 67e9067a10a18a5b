//! ffmpeg stream mapping and codec arguments

use crate::domain::rules::SelectionResult;

/// Target codec for the converted lossless track
pub const CONVERSION_CODEC: &str = "truehd";

/// Channel count the converted track is downmixed to
pub const CONVERSION_CHANNELS: u32 = 6;

/// Title written onto the converted track
pub const CONVERSION_TITLE: &str = "TrueHD 5.1";

/// Build the `-map` arguments for a selection.
///
/// Without a conversion every input stream is mapped in container order and
/// the discarded ones are excluded with negative maps. With a conversion the
/// mapping is explicit: primary video, the conversion source (which becomes
/// the first audio track), then every other retained stream ascending,
/// including the original copy of the source and any untagged streams.
pub fn stream_mapping(selection: &SelectionResult) -> Vec<String> {
    let mut args = Vec::new();

    match selection.conversion_source {
        None => {
            push_map(&mut args, "0".to_string());
            for index in &selection.discarded_indexes {
                push_map(&mut args, format!("-0:{}", index));
            }
        }
        Some(source) => {
            if let Some(video) = selection.primary_video {
                push_map(&mut args, format!("0:{}", video));
            }
            push_map(&mut args, format!("0:{}", source));

            let mut rest: Vec<u32> = selection
                .kept_indexes
                .iter()
                .chain(selection.untagged_indexes.iter())
                .copied()
                .collect();
            rest.sort_unstable();
            rest.dedup();
            for index in rest {
                push_map(&mut args, format!("0:{}", index));
            }
        }
    }

    args
}

/// Codec arguments: stream copy everywhere, plus the re-encode clause when converting
pub fn codec_args(selection: &SelectionResult) -> Vec<String> {
    let mut args = vec!["-c".to_string(), "copy".to_string()];

    if selection.conversion_source.is_some() {
        args.extend([
            "-c:a:0".to_string(),
            CONVERSION_CODEC.to_string(),
            "-ac".to_string(),
            CONVERSION_CHANNELS.to_string(),
            "-strict".to_string(),
            "-2".to_string(),
            "-metadata:s:a:0".to_string(),
            format!("title={}", CONVERSION_TITLE),
            // New track becomes the default, the former first audio track does not
            "-disposition:a:0".to_string(),
            "default".to_string(),
            "-disposition:a:1".to_string(),
            "0".to_string(),
        ]);
    }

    args
}

fn push_map(args: &mut Vec<String>, spec: String) {
    args.push("-map".to_string());
    args.push(spec);
}
