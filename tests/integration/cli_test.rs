//! Integration tests for the heicconv binary

use image::{DynamicImage, Rgba, RgbaImage};
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::tempdir;

fn run_heicconv(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_heicconv"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute heicconv")
}

fn write_image(dir: &Path, name: &str) -> PathBuf {
    let mut buf = Vec::new();
    DynamicImage::ImageRgba8(RgbaImage::from_pixel(3, 3, Rgba([0, 128, 255, 255])))
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    let path = dir.join(name);
    fs::write(&path, buf).unwrap();
    path
}

#[test]
fn test_no_arguments_reports_no_selection() {
    let output = run_heicconv(&[]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Please select at least one file."),
        "stderr: {}",
        stderr
    );
}

#[test]
fn test_missing_input_path_fails() {
    let output = run_heicconv(&["/definitely/not/here.heic"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("does not exist"), "stderr: {}", stderr);
}

#[test]
fn test_convert_single_file_to_png() {
    let input_dir = tempdir().unwrap();
    let output_dir = tempdir().unwrap();
    let input = write_image(input_dir.path(), "Photo.HEIC");

    let output = run_heicconv(&[
        input.to_str().unwrap(),
        "--format",
        "png",
        "--output",
        output_dir.path().to_str().unwrap(),
    ]);

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let converted = output_dir.path().join("Photo.png");
    assert!(converted.exists());
    let decoded = image::open(&converted).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (3, 3));
}

#[test]
fn test_directory_with_archive_only() {
    let input_dir = tempdir().unwrap();
    let nested = input_dir.path().join("sub");
    fs::create_dir_all(&nested).unwrap();
    write_image(input_dir.path(), "a.heic");
    write_image(&nested, "b.HEIC");
    fs::write(input_dir.path().join("readme.txt"), "skip me").unwrap();

    let output_dir = tempdir().unwrap();
    let output = run_heicconv(&[
        input_dir.path().to_str().unwrap(),
        "--recursive",
        "--archive",
        "--no-files",
        "--archive-name",
        "photos.zip",
        "-o",
        output_dir.path().to_str().unwrap(),
        "--quiet",
    ]);

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(output.stdout.is_empty());

    let archive = output_dir.path().join("photos.zip");
    let zip = zip::ZipArchive::new(fs::File::open(&archive).unwrap()).unwrap();
    let mut names: Vec<&str> = zip.file_names().collect();
    names.sort();
    assert_eq!(names, vec!["a.jpeg", "b.jpeg"]);

    assert!(!output_dir.path().join("a.jpeg").exists());
}

#[test]
fn test_stats_as_json() {
    let input_dir = tempdir().unwrap();
    let output_dir = tempdir().unwrap();
    let input = write_image(input_dir.path(), "x.heic");

    let output = run_heicconv(&[
        input.to_str().unwrap(),
        "-o",
        output_dir.path().to_str().unwrap(),
        "--quiet",
        "--stats",
        "--json",
    ]);

    assert!(output.status.success());
    let stats: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(stats["converted_count"], 1);
    assert_eq!(stats["failed_count"], 0);
}

#[test]
fn test_invalid_format_is_rejected_by_parser() {
    let output = run_heicconv(&["--format", "webp", "a.heic"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("webp"), "stderr: {}", stderr);
}

#[test]
fn test_help_states_heif_support() {
    let output = run_heicconv(&["--help"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("HEIC/HEIF decoding:"), "stdout: {}", stdout);
}
