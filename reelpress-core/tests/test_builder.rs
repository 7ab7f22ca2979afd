use reelpress_core::config::{CoreConfigBuilder, DEFAULT_MAX_WIDTH, DEFAULT_MOBILE_MAX_WIDTH, EncodeProfile};
use reelpress_core::error::CoreError;
use std::path::PathBuf;

#[test]
fn test_builder_pattern() {
    let config = CoreConfigBuilder::new()
        .video_dir("site/video")
        .target_size_mb(6.5)
        .file_list(vec!["IMG_7651.mp4".to_string()])
        .poster_offset("00:00:03")
        .build();

    assert_eq!(config.video_dir, PathBuf::from("site/video"));
    assert_eq!(config.target_size_mb, 6.5);
    assert_eq!(config.max_width, DEFAULT_MAX_WIDTH);
    assert_eq!(config.effective_poster_dir(), PathBuf::from("site/img"));
    assert!(config.validate().is_ok());
}

#[test]
fn test_profile_drives_default_width() {
    let mobile = CoreConfigBuilder::new()
        .profile(EncodeProfile::MobileFriendly)
        .build();
    assert_eq!(mobile.max_width, DEFAULT_MOBILE_MAX_WIDTH);

    let explicit = CoreConfigBuilder::new()
        .max_width(1920)
        .profile(EncodeProfile::MobileFriendly)
        .build();
    assert_eq!(explicit.max_width, 1920);
}

#[test]
fn test_validation_rejects_bad_values() {
    let bad = [
        CoreConfigBuilder::new().target_size_mb(0.0).build(),
        CoreConfigBuilder::new().max_width(0).build(),
        CoreConfigBuilder::new().poster_offset("soon").build(),
        CoreConfigBuilder::new().poster_max_width(Some(0)).build(),
        CoreConfigBuilder::new().file_list(vec!["../secret.mp4".to_string()]).build(),
    ];
    for config in bad {
        assert!(matches!(config.validate(), Err(CoreError::Config(_))), "{config:?}");
    }
}
