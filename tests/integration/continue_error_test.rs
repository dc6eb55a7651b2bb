//! Integration tests for partial batch failures

use image::{DynamicImage, Rgb, RgbImage};
use std::fs;
use std::io::Cursor;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::tempdir;

fn run_heicconv(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_heicconv"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute heicconv")
}

fn write_valid(dir: &Path, name: &str) {
    let mut buf = Vec::new();
    DynamicImage::ImageRgb8(RgbImage::from_pixel(2, 2, Rgb([9, 9, 9])))
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    fs::write(dir.join(name), buf).unwrap();
}

#[test]
fn test_corrupt_file_does_not_stop_the_batch() {
    let input_dir = tempdir().unwrap();
    write_valid(input_dir.path(), "x.heic");
    fs::write(input_dir.path().join("y.HEIC"), b"corrupt").unwrap();
    write_valid(input_dir.path(), "z.heic");

    let output_dir = tempdir().unwrap();
    let output = run_heicconv(&[
        input_dir.path().join("x.heic").to_str().unwrap(),
        input_dir.path().join("y.HEIC").to_str().unwrap(),
        input_dir.path().join("z.heic").to_str().unwrap(),
        "-o",
        output_dir.path().to_str().unwrap(),
        "--archive",
    ]);

    // Partial success still exits cleanly
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Errors occurred while converting the following files: y.HEIC"),
        "stderr: {}",
        stderr
    );

    assert!(output_dir.path().join("x.jpeg").exists());
    assert!(!output_dir.path().join("y.jpeg").exists());
    assert!(output_dir.path().join("z.jpeg").exists());

    let zip = zip::ZipArchive::new(
        fs::File::open(output_dir.path().join("converted_images.zip")).unwrap(),
    )
    .unwrap();
    assert_eq!(zip.len(), 2);
}

#[test]
fn test_every_file_failing_exits_with_error() {
    let input_dir = tempdir().unwrap();
    fs::write(input_dir.path().join("a.heic"), b"corrupt").unwrap();
    fs::write(input_dir.path().join("b.heic"), b"corrupt").unwrap();

    let output_dir = tempdir().unwrap();
    let output = run_heicconv(&[
        input_dir.path().to_str().unwrap(),
        "-o",
        output_dir.path().to_str().unwrap(),
    ]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("a.heic, b.heic"), "stderr: {}", stderr);
    assert!(
        stderr.contains("None of the 2 selected file(s) could be converted"),
        "stderr: {}",
        stderr
    );
}

#[test]
fn test_quiet_mode_still_reports_failed_files() {
    let input_dir = tempdir().unwrap();
    write_valid(input_dir.path(), "x.heic");
    fs::write(input_dir.path().join("y.HEIC"), b"corrupt").unwrap();

    let output_dir = tempdir().unwrap();
    let output = run_heicconv(&[
        input_dir.path().join("x.heic").to_str().unwrap(),
        input_dir.path().join("y.HEIC").to_str().unwrap(),
        "-o",
        output_dir.path().to_str().unwrap(),
        "--quiet",
    ]);

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Errors occurred while converting the following files: y.HEIC"),
        "stderr: {}",
        stderr
    );
    assert!(output_dir.path().join("x.jpeg").exists());
}

#[test]
fn test_archive_with_nothing_converted() {
    let input_dir = tempdir().unwrap();
    fs::write(input_dir.path().join("a.heic"), b"corrupt").unwrap();

    let output_dir = tempdir().unwrap();
    let output = run_heicconv(&[
        input_dir.path().to_str().unwrap(),
        "-o",
        output_dir.path().to_str().unwrap(),
        "--archive",
    ]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Please convert at least one file."), "stderr: {}", stderr);
    assert!(!output_dir.path().join("converted_images.zip").exists());
}
