//! Compression planning.
//!
//! Derives the encoder parameters for one video from its probed metadata: an
//! average bitrate that lands the output near a target file size, and an
//! optional downscale for frames wider than the configured limit.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::error::{CoreError, CoreResult};

/// Kilobits per megabyte (1024 KB/MB x 8 bits/byte).
pub const KBITS_PER_MEGABYTE: f64 = 8192.0;

/// Metadata probed once from a source video.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VideoDescriptor {
    pub path: PathBuf,
    pub duration_secs: f64,
    pub width: u32,
    pub height: u32,
    pub size_bytes: u64,
}

/// Frame dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Encoder parameters derived for a single video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CompressionPlan {
    pub target_bitrate_kbps: u32,
    pub resize_to: Option<Resolution>,
}

impl CompressionPlan {
    /// Bitrate in the form ffmpeg expects, e.g. `"546k"`.
    #[must_use]
    pub fn bitrate_arg(&self) -> String {
        format!("{}k", self.target_bitrate_kbps)
    }
}

/// Computes the compression plan for `descriptor`.
///
/// `target_bitrate_kbps = floor(target_size_mb * 8192 / duration_secs)`, never
/// less than 1. When the source is wider than `max_width` the plan scales it
/// to `max_width` and rounds the height to keep the aspect ratio.
///
/// # Errors
///
/// Returns [`CoreError::InvalidInput`] for a non-positive or non-finite
/// duration, zero frame dimensions, a non-positive target size or a zero
/// width limit.
///
/// # Examples
///
/// ```rust
/// use reelpress_core::processing::plan::{plan, Resolution, VideoDescriptor};
///
/// let descriptor = VideoDescriptor {
///     path: "IMG_7651.mp4".into(),
///     duration_secs: 60.0,
///     width: 1920,
///     height: 1080,
///     size_bytes: 48_000_000,
/// };
///
/// let plan = plan(&descriptor, 4.0, 1280).unwrap();
/// assert_eq!(plan.target_bitrate_kbps, 546);
/// assert_eq!(plan.resize_to, Some(Resolution { width: 1280, height: 720 }));
/// ```
pub fn plan(
    descriptor: &VideoDescriptor,
    target_size_mb: f64,
    max_width: u32,
) -> CoreResult<CompressionPlan> {
    let duration = descriptor.duration_secs;
    if !duration.is_finite() || duration <= 0.0 {
        return Err(CoreError::InvalidInput(format!(
            "{} has an unusable duration of {} seconds",
            descriptor.path.display(),
            duration
        )));
    }
    if descriptor.width == 0 || descriptor.height == 0 {
        return Err(CoreError::InvalidInput(format!(
            "{} has invalid frame dimensions {}x{}",
            descriptor.path.display(),
            descriptor.width,
            descriptor.height
        )));
    }
    if !target_size_mb.is_finite() || target_size_mb <= 0.0 {
        return Err(CoreError::InvalidInput(format!(
            "Target size must be positive, got {target_size_mb} MB"
        )));
    }
    if max_width == 0 {
        return Err(CoreError::InvalidInput("Maximum width must be positive".to_string()));
    }

    let kbps = (target_size_mb * KBITS_PER_MEGABYTE / duration).floor();
    // `as` saturates; the floor of a very long video still has to be usable.
    let target_bitrate_kbps = (kbps as u32).max(1);

    let resize_to = (descriptor.width > max_width).then(|| {
        let scaled = f64::from(descriptor.height) * f64::from(max_width) / f64::from(descriptor.width);
        Resolution {
            width: max_width,
            height: (scaled.round() as u32).max(1),
        }
    });

    Ok(CompressionPlan {
        target_bitrate_kbps,
        resize_to,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(duration_secs: f64, width: u32, height: u32) -> VideoDescriptor {
        VideoDescriptor {
            path: PathBuf::from("clip.mp4"),
            duration_secs,
            width,
            height,
            size_bytes: 10_000_000,
        }
    }

    #[test]
    fn bitrate_for_one_minute() {
        let plan = plan(&descriptor(60.0, 1000, 600), 4.0, 1280).unwrap();
        assert_eq!(plan.target_bitrate_kbps, 546);
        assert_eq!(plan.bitrate_arg(), "546k");
        assert_eq!(plan.resize_to, None);
    }

    #[test]
    fn full_hd_scales_to_720p() {
        let plan = plan(&descriptor(30.0, 1920, 1080), 4.0, 1280).unwrap();
        assert_eq!(plan.resize_to, Some(Resolution { width: 1280, height: 720 }));
    }

    #[test]
    fn width_at_limit_is_kept() {
        let plan = plan(&descriptor(30.0, 1280, 720), 4.0, 1280).unwrap();
        assert_eq!(plan.resize_to, None);
    }

    #[test]
    fn portrait_height_rounds_to_nearest() {
        // 1350 * 1280 / 1441 = 1199.17
        let plan = plan(&descriptor(30.0, 1441, 1350), 4.0, 1280).unwrap();
        assert_eq!(plan.resize_to, Some(Resolution { width: 1280, height: 1199 }));
    }

    #[test]
    fn zero_duration_is_invalid() {
        let err = plan(&descriptor(0.0, 1920, 1080), 4.0, 1280).unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(_)));
        assert!(plan(&descriptor(-3.0, 1920, 1080), 4.0, 1280).is_err());
        assert!(plan(&descriptor(f64::NAN, 1920, 1080), 4.0, 1280).is_err());
    }

    #[test]
    fn zero_dimensions_are_invalid() {
        assert!(plan(&descriptor(10.0, 0, 1080), 4.0, 1280).is_err());
        assert!(plan(&descriptor(10.0, 1920, 0), 4.0, 1280).is_err());
    }

    #[test]
    fn very_long_video_keeps_positive_bitrate() {
        let plan = plan(&descriptor(1.0e9, 640, 360), 4.0, 1280).unwrap();
        assert_eq!(plan.target_bitrate_kbps, 1);
    }
}
