use heicconv::conversion::{derive_output_name, TargetFormat};
use pretty_assertions::assert_eq;

#[test]
fn test_uppercase_suffix_to_png() {
    assert_eq!(derive_output_name("Photo.HEIC", TargetFormat::Png), "Photo.png");
}

#[test]
fn test_lowercase_suffix_to_png() {
    assert_eq!(derive_output_name("photo.heic", TargetFormat::Png), "photo.png");
}

#[test]
fn test_jpeg_target_uses_jpeg_extension() {
    assert_eq!(derive_output_name("IMG_2041.HEIC", TargetFormat::Jpeg), "IMG_2041.jpeg");
}

#[test]
fn test_names_differing_only_in_case_collide() {
    let a = derive_output_name("pic.heic", TargetFormat::Png);
    let b = derive_output_name("pic.HEIC", TargetFormat::Png);
    assert_eq!(a, b);
}

#[test]
fn test_dots_inside_the_stem_are_kept() {
    assert_eq!(
        derive_output_name("2024.06.01 beach.heic", TargetFormat::Jpeg),
        "2024.06.01 beach.jpeg"
    );
}
