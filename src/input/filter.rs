use std::path::Path;

/// Extensions recognised as HEIC/HEIF sources, lowercase
pub const HEIC_EXTENSIONS: &[&str] = &["heic", "heif"];

/// Return true if the extension is a HEIC/HEIF one, ignoring case
pub fn is_heic_extension(ext: &str) -> bool {
    HEIC_EXTENSIONS
        .iter()
        .any(|known| ext.eq_ignore_ascii_case(known))
}

/// Return true if the path is an existing file with a HEIC/HEIF extension
pub fn is_heic_file(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(is_heic_extension)
}

/// Media type declared for a file name
pub fn media_type_for_name(name: &str) -> &'static str {
    match Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .as_deref()
    {
        Some("heic") => "image/heic",
        Some("heif") => "image/heif",
        _ => "application/octet-stream",
    }
}
