//! Directory scanning for HEIC inputs

use std::io;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

use crate::input::filter::is_heic_file;

/// Prefix of AppleDouble metadata files copied next to photos on non-HFS volumes
const APPLE_DOUBLE_PREFIX: &str = "._";

/// Collect the HEIC/HEIF files under `dir`, sorted by path.
///
/// Without `recursive` only the direct children of `dir` are listed.
/// AppleDouble `._*` companions are skipped.
pub fn find_heic_files(dir: &Path, recursive: bool) -> io::Result<Vec<PathBuf>> {
    let max_depth = if recursive { usize::MAX } else { 1 };

    let mut found = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(max_depth) {
        let entry = entry?;
        if is_candidate(&entry) {
            found.push(entry.into_path());
        }
    }

    found.sort();
    Ok(found)
}

fn is_candidate(entry: &DirEntry) -> bool {
    entry.file_type().is_file()
        && !entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.starts_with(APPLE_DOUBLE_PREFIX))
        && is_heic_file(entry.path())
}
