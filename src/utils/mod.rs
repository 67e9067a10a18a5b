//! Common utilities and helpers

pub mod shell;

const SIZE_UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

/// Format a byte count with automatic units, rounded to two decimals.
///
/// Whole bytes print without a fraction (`500B`); scaled values always keep
/// at least one decimal (`1.5KB`, `1.0GB`).
pub fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{}{}", bytes, SIZE_UNITS[0]);
    }

    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }

    // Exact halves go to the even neighbour: 1152 bytes is 1.12KB
    let rounded = (size * 100.0).round_ties_even() / 100.0;
    format!("{:?}{}", rounded, SIZE_UNITS[unit])
}

/// Human-readable channel layout: 2 becomes `2.0`, 6 becomes `5.1`
pub fn parse_ac(channels: u32) -> String {
    match channels {
        0 => String::new(),
        1 | 2 => format!("{}.0", channels),
        n => format!("{}.1", n - 1),
    }
}

/// Shorten the verbose codec profile names ffprobe reports
pub fn replace_audio_names(name: &str) -> String {
    let lower = name.to_lowercase();
    if lower.contains("truehd") && lower.contains("atmos") {
        "THD Atmos".to_string()
    } else if lower.contains("truehd") {
        "TrueHD".to_string()
    } else if lower == "dolby digital plus + dolby atmos" {
        "DD+ Atmos".to_string()
    } else {
        name.to_string()
    }
}

/// Calculate a percentage, zero when the total is zero
pub fn percentage(part: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0), "0B");
        assert_eq!(format_bytes(500), "500B");
        assert_eq!(format_bytes(1023), "1023B");
        assert_eq!(format_bytes(1024), "1.0KB");
        assert_eq!(format_bytes(1536), "1.5KB");
        assert_eq!(format_bytes(1_234_567), "1.18MB");
        assert_eq!(format_bytes(1152), "1.12KB");
        assert_eq!(format_bytes(1408), "1.38KB");
        assert_eq!(format_bytes(1_073_741_824), "1.0GB");
        assert_eq!(format_bytes(5 * 1_099_511_627_776), "5120.0GB");
    }

    #[test]
    fn test_parse_ac() {
        assert_eq!(parse_ac(0), "");
        assert_eq!(parse_ac(1), "1.0");
        assert_eq!(parse_ac(2), "2.0");
        assert_eq!(parse_ac(6), "5.1");
        assert_eq!(parse_ac(8), "7.1");
    }

    #[test]
    fn test_replace_audio_names() {
        assert_eq!(replace_audio_names("TrueHD + Atmos"), "THD Atmos");
        assert_eq!(replace_audio_names("truehd"), "TrueHD");
        assert_eq!(
            replace_audio_names("Dolby Digital Plus + Dolby Atmos"),
            "DD+ Atmos"
        );
        assert_eq!(replace_audio_names("Dolby Digital Plus"), "Dolby Digital Plus");
        assert_eq!(replace_audio_names("DTS-HD MA"), "DTS-HD MA");
    }

    #[test]
    fn test_percentage() {
        assert_eq!(percentage(0, 0), 0.0);
        assert_eq!(percentage(1, 4), 25.0);
    }
}
