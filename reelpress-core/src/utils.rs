//! Utility functions for formatting and path handling.
//!
//! This module provides general-purpose helpers used throughout the
//! reelpress-core library: duration and byte formatting, ffmpeg timestamp
//! parsing, file name extraction and size-reduction arithmetic.

use std::path::Path;

use crate::error::{CoreError, CoreResult};

/// Formats seconds as HH:MM:SS (e.g., 3725.0 -> "01:02:05"). Returns "??:??:??" for invalid inputs.
#[must_use]
pub fn format_duration(seconds: f64) -> String {
    if seconds < 0.0 || !seconds.is_finite() {
        return "??:??:??".to_string();
    }

    let total_seconds = seconds as u64;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let secs = total_seconds % 60;
    format!("{hours:02}:{minutes:02}:{secs:02}")
}

/// Formats bytes with appropriate binary units (B, KiB, MiB, GiB).
#[must_use]
pub fn format_bytes(bytes: u64) -> String {
    const KIB: f64 = 1024.0;
    const MIB: f64 = KIB * 1024.0;
    const GIB: f64 = MIB * 1024.0;

    let bytes_f64 = bytes as f64;
    if bytes_f64 >= GIB {
        format!("{:.2} GiB", bytes_f64 / GIB)
    } else if bytes_f64 >= MIB {
        format!("{:.2} MiB", bytes_f64 / MIB)
    } else if bytes_f64 >= KIB {
        format!("{:.2} KiB", bytes_f64 / KIB)
    } else {
        format!("{bytes} B")
    }
}

/// Parses an FFmpeg time string (HH:MM:SS or HH:MM:SS.MS) to seconds. Returns None if invalid.
#[must_use]
pub fn parse_ffmpeg_time(time: &str) -> Option<f64> {
    let parts: Vec<&str> = time.split(':').collect();
    if parts.len() == 3 {
        let hours = parts[0].parse::<f64>().ok()?;
        let minutes = parts[1].parse::<f64>().ok()?;
        let seconds = parts[2].parse::<f64>().ok()?;
        if hours < 0.0 || minutes < 0.0 || seconds < 0.0 {
            return None;
        }
        Some(hours * 3600.0 + minutes * 60.0 + seconds)
    } else {
        None
    }
}

/// Safely extracts the filename from a path.
pub fn get_filename_safe(path: &Path) -> CoreResult<String> {
    Ok(path
        .file_name()
        .ok_or_else(|| CoreError::PathError(format!("Failed to get filename for {}", path.display())))?
        .to_string_lossy()
        .to_string())
}

/// Percentage by which `output_size` is smaller than `input_size`.
/// Negative when the output grew. Returns 0 if `input_size` is 0.
#[must_use]
pub fn calculate_size_reduction(input_size: u64, output_size: u64) -> f64 {
    if input_size == 0 {
        return 0.0;
    }
    (input_size as f64 - output_size as f64) / input_size as f64 * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0.0), "00:00:00");
        assert_eq!(format_duration(59.9), "00:00:59");
        assert_eq!(format_duration(3725.0), "01:02:05");
        assert_eq!(format_duration(-1.0), "??:??:??");
        assert_eq!(format_duration(f64::INFINITY), "??:??:??");
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(1023), "1023 B");
        assert_eq!(format_bytes(1536), "1.50 KiB");
        assert_eq!(format_bytes(4 * 1024 * 1024), "4.00 MiB");
        assert_eq!(format_bytes(1024 * 1024 * 1024), "1.00 GiB");
    }

    #[test]
    fn test_parse_ffmpeg_time() {
        assert_eq!(parse_ffmpeg_time("00:00:01"), Some(1.0));
        assert_eq!(parse_ffmpeg_time("01:02:03.5"), Some(3723.5));
        assert_eq!(parse_ffmpeg_time("1.5"), None);
        assert_eq!(parse_ffmpeg_time("aa:bb:cc"), None);
        assert_eq!(parse_ffmpeg_time("00:-1:00"), None);
    }

    #[test]
    fn test_get_filename_safe() {
        assert_eq!(get_filename_safe(Path::new("video/IMG_7651.mp4")).unwrap(), "IMG_7651.mp4");
        assert!(get_filename_safe(Path::new("/")).is_err());
    }

    #[test]
    fn test_calculate_size_reduction() {
        assert_eq!(calculate_size_reduction(0, 10), 0.0);
        assert_eq!(calculate_size_reduction(100, 25), 75.0);
        assert_eq!(calculate_size_reduction(100, 150), -50.0);
    }
}
