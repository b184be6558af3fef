//! Runs the `tessera` binary against a temporary store directory.

use std::path::Path;
use std::process::{Command, Output};

use tessera_core::encode::encode;
use tessera_core::{ImageFormat, RasterImage};

fn write_image(dir: &Path, key: &str, width: u32, height: u32, format: ImageFormat) {
    let img = RasterImage::filled(width, height, [200, 100, 50, 255]);
    std::fs::write(dir.join(key), encode(&img, format, 75).unwrap()).unwrap();
}

fn tessera(store: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_tessera"))
        .arg("--store-dir")
        .arg(store)
        .args(args)
        .env_remove("TESSERA_CONFIG")
        .env_remove("TESSERA_QUALITY")
        .env_remove("TESSERA_WATERMARK")
        .output()
        .unwrap()
}

fn stdout_json(output: &Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_meta_prints_dimensions() {
    let dir = tempfile::tempdir().unwrap();
    write_image(dir.path(), "cat.jpg", 1000, 750, ImageFormat::Jpeg);

    let output = tessera(dir.path(), &["meta", "cat.jpg"]);
    assert!(output.status.success());

    let json = stdout_json(&output);
    assert_eq!(json["width"], 1000);
    assert_eq!(json["height"], 750);
    assert!(json["fileSize"].as_str().unwrap().ends_with("KB"));
}

#[test]
fn test_thumbnail_writes_derivative() {
    let dir = tempfile::tempdir().unwrap();
    write_image(dir.path(), "small.png", 120, 80, ImageFormat::Png);

    let output = tessera(dir.path(), &["thumbnail", "small.png"]);
    assert!(output.status.success());

    let json = stdout_json(&output);
    assert_eq!(json["path"], "small-400x300.png");
    assert_eq!(json["width"], 400);
    assert_eq!(json["height"], 300);
    assert!(dir.path().join("small-400x300.png").exists());
}

#[test]
fn test_watermark_writes_derivative() {
    let dir = tempfile::tempdir().unwrap();
    write_image(dir.path(), "photo.jpg", 200, 100, ImageFormat::Jpeg);
    let mark = RasterImage::filled(10, 10, [255, 255, 255, 255]);
    let mark_path = dir.path().join("mark.png");
    std::fs::write(&mark_path, encode(&mark, ImageFormat::Png, 75).unwrap()).unwrap();

    let output = tessera(
        dir.path(),
        &["--watermark", mark_path.to_str().unwrap(), "watermark", "photo.jpg"],
    );
    assert!(output.status.success());
    assert_eq!(stdout_json(&output)["path"], "photo-watermark.jpg");
    assert!(dir.path().join("photo-watermark.jpg").exists());
}

#[test]
fn test_missing_watermark_asset_fails() {
    let dir = tempfile::tempdir().unwrap();
    write_image(dir.path(), "photo.jpg", 200, 100, ImageFormat::Jpeg);

    let output = tessera(
        dir.path(),
        &["--watermark", "/no/such/mark.png", "watermark", "photo.jpg"],
    );
    assert!(!output.status.success());
    assert_eq!(stdout_json(&output)["kind"], "missing_watermark");
    assert!(!dir.path().join("photo-watermark.jpg").exists());
}

#[test]
fn test_undecodable_source_reports_kind() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("junk.jpg"), b"definitely not an image").unwrap();

    let output = tessera(dir.path(), &["thumbnail", "junk.jpg"]);
    assert!(!output.status.success());
    assert_eq!(stdout_json(&output)["kind"], "decode_error");
    assert!(!dir.path().join("junk-400x300.jpg").exists());
}
