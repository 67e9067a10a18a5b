// Unit tests for domain models

use super::*;

fn tags(pairs: &[(&str, &str)]) -> Option<Vec<(String, String)>> {
    Some(
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
    )
}

fn audio(index: u32, lang: &str) -> RawStream {
    RawStream {
        index,
        codec_type: Some("audio".to_string()),
        tags: tags(&[("language", lang)]),
        channels: Some(6),
        profile: Some("DTS-HD MA".to_string()),
        codec_name: Some("dts".to_string()),
        ..Default::default()
    }
}

#[test]
fn test_stream_kind_mapping() {
    assert_eq!(StreamKind::from_codec_type(Some("video")), StreamKind::Video);
    assert_eq!(StreamKind::from_codec_type(Some("audio")), StreamKind::Audio);
    assert_eq!(StreamKind::from_codec_type(Some("subtitle")), StreamKind::Subtitle);
    assert_eq!(StreamKind::from_codec_type(Some("attachment")), StreamKind::Other);
    assert_eq!(StreamKind::from_codec_type(Some("data")), StreamKind::Other);
    assert_eq!(StreamKind::from_codec_type(None), StreamKind::Other);
}

#[test]
fn test_size_from_statistics_tag() {
    let raw = RawStream {
        tags: tags(&[("language", "eng"), ("NUMBER_OF_BYTES-eng", "123456")]),
        duration: Some("10.0".to_string()),
        bit_rate: Some("800".to_string()),
        ..Default::default()
    };
    assert_eq!(derive_size(&raw), 123456);
}

#[test]
fn test_size_first_matching_tag_wins() {
    let raw = RawStream {
        tags: tags(&[("NUMBER_OF_BYTES", "10"), ("NUMBER_OF_BYTES-eng", "20")]),
        ..Default::default()
    };
    assert_eq!(derive_size(&raw), 10);
}

#[test]
fn test_size_tag_match_is_case_sensitive() {
    let raw = RawStream {
        tags: tags(&[("number_of_bytes", "10")]),
        ..Default::default()
    };
    assert_eq!(derive_size(&raw), 0);
}

#[test]
fn test_size_falls_back_to_duration_and_bit_rate() {
    let raw = RawStream {
        tags: tags(&[("language", "eng")]),
        duration: Some("100.5".to_string()),
        bit_rate: Some("1600".to_string()),
        ..Default::default()
    };
    assert_eq!(derive_size(&raw), 20100);
}

#[test]
fn test_size_defaults_to_zero() {
    let raw = RawStream {
        tags: tags(&[("language", "eng")]),
        duration: Some("100.0".to_string()),
        ..Default::default()
    };
    assert_eq!(derive_size(&raw), 0);
}

#[test]
fn test_classify_skips_untagged() {
    let raw = RawStream {
        index: 3,
        codec_type: Some("audio".to_string()),
        ..Default::default()
    };
    assert!(StreamInfo::classify(&raw).is_none());

    let empty = RawStream {
        tags: Some(vec![]),
        ..raw
    };
    assert!(StreamInfo::classify(&empty).is_none());
}

#[test]
fn test_classify_video_has_no_language() {
    let raw = RawStream {
        index: 0,
        codec_type: Some("video".to_string()),
        tags: tags(&[("language", "eng")]),
        channels: Some(2),
        profile: Some("High".to_string()),
        ..Default::default()
    };
    let info = StreamInfo::classify(&raw).unwrap();
    assert_eq!(info.kind, StreamKind::Video);
    assert_eq!(info.language, None);
    assert_eq!(info.codec_profile, None);
    assert_eq!(info.channel_count, 0);
}

#[test]
fn test_classify_audio_profile_fallback() {
    let mut raw = audio(1, "eng");
    let info = StreamInfo::classify(&raw).unwrap();
    assert_eq!(info.codec_profile.as_deref(), Some("DTS-HD MA"));
    assert_eq!(info.channel_count, 6);
    assert_eq!(info.language.as_deref(), Some("eng"));

    raw.profile = None;
    raw.channels = None;
    let info = StreamInfo::classify(&raw).unwrap();
    assert_eq!(info.codec_profile.as_deref(), Some("dts"));
    assert_eq!(info.channel_count, 0);
}

#[test]
fn test_classify_streams_reports_untagged_indexes() {
    let report = ProbeReport {
        path: "movie.mkv".to_string(),
        streams: vec![
            audio(1, "eng"),
            RawStream {
                index: 2,
                codec_type: Some("attachment".to_string()),
                ..Default::default()
            },
            audio(3, "fre"),
        ],
        ..Default::default()
    };
    let (streams, untagged) = classify_streams(&report);
    assert_eq!(streams.iter().map(|s| s.index).collect::<Vec<_>>(), vec![1, 3]);
    assert_eq!(untagged, vec![2]);
}
