use assert_cmd::Command;
use predicates::str::contains;
use std::error::Error;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

// Helper to run the compiled binary inside `workdir`, isolated from the caller's environment
fn reelpress_cmd(workdir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("reelpress").expect("Failed to find reelpress binary");
    cmd.current_dir(workdir)
        .env_remove("REELPRESS_FFMPEG")
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn test_help_lists_commands() {
    let workdir = tempdir().unwrap();
    reelpress_cmd(workdir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("compress"))
        .stdout(contains("plan"));
}

#[test]
fn test_compress_missing_directory_fails() -> Result<(), Box<dyn Error>> {
    let workdir = tempdir()?;

    reelpress_cmd(workdir.path())
        .args(["compress", "does/not/exist"])
        .assert()
        .failure()
        .code(1)
        .stderr(contains("Video directory not found"));

    Ok(())
}

#[test]
fn test_compress_empty_directory_fails() -> Result<(), Box<dyn Error>> {
    let workdir = tempdir()?;
    let video_dir = workdir.path().join("video");
    fs::create_dir(&video_dir)?;
    fs::write(video_dir.join("notes.txt"), "not a video")?;

    reelpress_cmd(workdir.path())
        .arg("compress")
        .arg(&video_dir)
        .assert()
        .failure()
        .stderr(contains("No video files found"));

    Ok(())
}

#[test]
fn test_compress_unknown_file_list_fails() -> Result<(), Box<dyn Error>> {
    let workdir = tempdir()?;
    let video_dir = workdir.path().join("video");
    fs::create_dir(&video_dir)?;
    fs::write(video_dir.join("IMG_7651.mp4"), "dummy content")?;

    reelpress_cmd(workdir.path())
        .arg("compress")
        .arg(&video_dir)
        .args(["--files", "IMG_0001.mp4,IMG_0002.mp4"])
        .assert()
        .failure()
        .stderr(contains("No video files found"));

    Ok(())
}

#[test]
fn test_compress_invalid_target_size_fails() -> Result<(), Box<dyn Error>> {
    let workdir = tempdir()?;
    let video_dir = workdir.path().join("video");
    fs::create_dir(&video_dir)?;
    fs::write(video_dir.join("IMG_7651.mp4"), "dummy content")?;

    reelpress_cmd(workdir.path())
        .arg("compress")
        .arg(&video_dir)
        .args(["--target-size-mb", "0"])
        .assert()
        .failure()
        .stderr(contains("Invalid configuration"));

    Ok(())
}

#[test]
fn test_compress_missing_encoder_leaves_videos_untouched() -> Result<(), Box<dyn Error>> {
    let workdir = tempdir()?;
    let video_dir = workdir.path().join("video");
    fs::create_dir(&video_dir)?;
    let video = video_dir.join("IMG_7651.mp4");
    fs::write(&video, "dummy content")?;

    reelpress_cmd(workdir.path())
        .arg("compress")
        .arg(&video_dir)
        .arg("--ffmpeg")
        .arg(workdir.path().join("no-such-ffmpeg"))
        .assert()
        .failure()
        .stderr(contains("not found"));

    assert_eq!(fs::read_to_string(&video)?, "dummy content");
    assert!(!video_dir.join("IMG_7651_original.mp4").exists());
    Ok(())
}

#[test]
fn test_run_log_is_written() -> Result<(), Box<dyn Error>> {
    let workdir = tempdir()?;
    let log_dir = workdir.path().join("run-logs");

    reelpress_cmd(workdir.path())
        .args(["compress", "does/not/exist", "--log-dir"])
        .arg(&log_dir)
        .assert()
        .failure();

    let logs: Vec<_> = fs::read_dir(&log_dir)?
        .filter_map(Result::ok)
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(logs.len(), 1);
    assert!(logs[0].starts_with("reelpress_run_"));

    let contents = fs::read_to_string(log_dir.join(&logs[0]))?;
    assert!(contents.contains("Video directory not found"));
    Ok(())
}

#[test]
fn test_plan_missing_directory_fails() -> Result<(), Box<dyn Error>> {
    let workdir = tempdir()?;

    reelpress_cmd(workdir.path())
        .args(["plan", "does/not/exist", "--json"])
        .assert()
        .failure()
        .stderr(contains("Video directory not found"));

    Ok(())
}
