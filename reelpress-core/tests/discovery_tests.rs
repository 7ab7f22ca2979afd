// reelpress-core/tests/discovery_tests.rs

use reelpress_core::discovery::{find_processable_files, resolve_file_list};
use reelpress_core::error::CoreError;
use std::fs::{self, File};
use tempfile::tempdir;

#[test]
fn test_find_processable_files() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let video_dir = dir.path();

    File::create(video_dir.join("IMG_7651.mp4"))?;
    File::create(video_dir.join("IMG_7584.MP4"))?; // Test case insensitivity
    File::create(video_dir.join("IMG_7584_original.mp4"))?;
    File::create(video_dir.join("clip.mov"))?;
    File::create(video_dir.join("poster.jpg"))?;
    fs::create_dir(video_dir.join("archive"))?;
    File::create(video_dir.join("archive").join("old.mp4"))?; // Not scanned

    let files = find_processable_files(video_dir)?;
    let names: Vec<_> = files
        .iter()
        .map(|f| f.file_name().unwrap().to_string_lossy().into_owned())
        .collect();

    // Marked files are still listed; the batch reports them as skipped.
    assert_eq!(names, vec!["IMG_7584.MP4", "IMG_7584_original.mp4", "IMG_7651.mp4"]);
    Ok(())
}

#[test]
fn test_find_processable_files_empty() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    File::create(dir.path().join("notes.txt"))?;

    let result = find_processable_files(dir.path());
    assert!(matches!(result, Err(CoreError::NoFilesFound)));
    Ok(())
}

#[test]
fn test_find_processable_files_missing_dir() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("frontend").join("video");

    let result = find_processable_files(&missing);
    assert!(matches!(result, Err(CoreError::InputDirNotFound(_))));
}

#[test]
fn test_resolve_file_list_skips_missing_names() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    File::create(dir.path().join("IMG_7651.mp4"))?;

    let names = vec!["IMG_7584.mp4".to_string(), "IMG_7651.mp4".to_string()];
    let files = resolve_file_list(dir.path(), &names)?;

    assert_eq!(files, vec![dir.path().join("IMG_7651.mp4")]);
    Ok(())
}

#[test]
fn test_resolve_file_list_keeps_given_order() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    File::create(dir.path().join("b.mp4"))?;
    File::create(dir.path().join("a.mp4"))?;

    let names = vec!["b.mp4".to_string(), "a.mp4".to_string()];
    let files = resolve_file_list(dir.path(), &names)?;

    assert_eq!(files, vec![dir.path().join("b.mp4"), dir.path().join("a.mp4")]);
    Ok(())
}

#[test]
fn test_resolve_file_list_drops_duplicates() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    File::create(dir.path().join("a.mp4"))?;
    File::create(dir.path().join("b.mp4"))?;

    let names: Vec<String> = ["b.mp4", "a.mp4", "b.mp4", "a.mp4"]
        .iter()
        .map(ToString::to_string)
        .collect();
    let files = resolve_file_list(dir.path(), &names)?;

    assert_eq!(files, vec![dir.path().join("b.mp4"), dir.path().join("a.mp4")]);
    Ok(())
}

#[test]
fn test_resolve_file_list_nothing_found() {
    let dir = tempdir().unwrap();
    let names = vec!["IMG_0000.mp4".to_string()];

    let result = resolve_file_list(dir.path(), &names);
    assert!(matches!(result, Err(CoreError::NoFilesFound)));
}
