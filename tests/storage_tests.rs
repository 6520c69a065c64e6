// SPDX-License-Identifier: MPL-2.0

//! Integration tests for the capture cache

use shutter::backends::camera::types::ImageFormat;
use shutter::storage::{FileManager, load_thumbnail};

fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba([10, 200, 30, 255]));
    let mut bytes = Vec::new();
    img.write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    bytes
}

#[tokio::test]
async fn test_created_files_are_distinct() {
    let dir = tempfile::tempdir().unwrap();
    let files = FileManager::new(dir.path());
    files.prepare().await.unwrap();

    let first = files.create_image_file(b"one", ImageFormat::Jpeg).await.unwrap();
    let second = files.create_image_file(b"two", ImageFormat::Jpeg).await.unwrap();

    assert_ne!(first, second);
    assert_eq!(std::fs::read(&first).unwrap(), b"one");
    assert_eq!(std::fs::read(&second).unwrap(), b"two");
    assert!(first.starts_with(dir.path()));
}

#[tokio::test]
async fn test_prepare_sweeps_previous_run() {
    let dir = tempfile::tempdir().unwrap();
    let files = FileManager::new(dir.path());
    files.prepare().await.unwrap();
    files.create_image_file(b"old", ImageFormat::Png).await.unwrap();

    let swept = files.prepare().await.unwrap();
    assert_eq!(swept, 1);
}

#[tokio::test]
async fn test_import_then_delete() {
    let source_dir = tempfile::tempdir().unwrap();
    let source = source_dir.path().join("holiday.png");
    std::fs::write(&source, png_bytes(8, 8)).unwrap();

    let cache = tempfile::tempdir().unwrap();
    let files = FileManager::new(cache.path());
    files.prepare().await.unwrap();

    let imported = files.import(&source).await.unwrap();
    assert!(imported.starts_with(cache.path()));
    assert!(source.exists(), "Import copies, it does not move");

    let thumb = load_thumbnail(imported.clone()).await.unwrap();
    assert_eq!((thumb.width, thumb.height), (8, 8));

    files.delete(&imported).await.unwrap();
    assert!(!imported.exists());
    // Deleting twice is fine
    files.delete(&imported).await.unwrap();
}

#[tokio::test]
async fn test_import_rejects_non_images() {
    let source_dir = tempfile::tempdir().unwrap();
    let source = source_dir.path().join("notes.txt");
    std::fs::write(&source, b"hello").unwrap();

    let cache = tempfile::tempdir().unwrap();
    let files = FileManager::new(cache.path());
    files.prepare().await.unwrap();

    assert!(files.import(&source).await.is_err());
}

#[tokio::test]
async fn test_delete_refuses_outside_cache() {
    let outside = tempfile::tempdir().unwrap();
    let victim = outside.path().join("keep.jpg");
    std::fs::write(&victim, b"x").unwrap();

    let cache = tempfile::tempdir().unwrap();
    let files = FileManager::new(cache.path());

    assert!(files.delete(&victim).await.is_err());
    assert!(victim.exists());
}

#[tokio::test]
async fn test_export_copies_into_target() {
    let cache = tempfile::tempdir().unwrap();
    let files = FileManager::new(cache.path());
    files.prepare().await.unwrap();
    let path = files.create_image_file(b"pic", ImageFormat::Jpeg).await.unwrap();

    let target = tempfile::tempdir().unwrap();
    let exported = files.export(&path, &target.path().join("shutter")).await.unwrap();

    assert!(exported.starts_with(target.path()));
    assert_eq!(std::fs::read(&exported).unwrap(), b"pic");
    assert!(path.exists(), "The roll keeps its copy");
}
