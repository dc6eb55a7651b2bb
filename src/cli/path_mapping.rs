use std::path::{Path, PathBuf};

/// Map a converted file name into the output directory.
/// Only the base name is kept so a crafted name cannot escape `output_dir`.
pub fn map_output_path(output_dir: &Path, file_name: &str, fallback: &str) -> PathBuf {
    let safe_name = Path::new(file_name)
        .file_name()
        .and_then(|n| n.to_str())
        .filter(|s| !s.is_empty() && *s != "." && *s != "..")
        .unwrap_or(fallback);
    output_dir.join(safe_name)
}
