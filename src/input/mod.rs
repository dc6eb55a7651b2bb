//! Input selection: files handed to a conversion batch

pub mod directory;
pub mod filter;

use crate::error::{ConversionError, ConversionErrorKind, ConversionResult};
use std::path::{Path, PathBuf};

/// A selected input image: an opaque blob with a name and a declared media type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFile {
    name: String,
    media_type: String,
    data: Vec<u8>,
}

impl InputFile {
    /// Create an input file, deriving the media type from the name
    pub fn new(name: impl Into<String>, data: Vec<u8>) -> Self {
        let name = name.into();
        let media_type = filter::media_type_for_name(&name).to_string();
        Self {
            name,
            media_type,
            data,
        }
    }

    /// Read a file from disk; the input name is the file's base name
    pub fn from_path(path: &Path) -> ConversionResult<Self> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| {
                ConversionError::conversion(ConversionErrorKind::io(
                    "Path has no file name".to_string(),
                    Some(path.to_path_buf()),
                ))
            })?;

        let data = std::fs::read(path).map_err(|e| {
            ConversionError::conversion(ConversionErrorKind::io(
                e.to_string(),
                Some(path.to_path_buf()),
            ))
        })?;

        Ok(Self::new(name, data))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Resolve CLI paths into the ordered list of files to convert.
///
/// Explicit file paths are kept in the order given. Directories contribute
/// their HEIC/HEIF files, sorted by path.
pub fn resolve_input_paths(paths: &[PathBuf], recursive: bool) -> ConversionResult<Vec<PathBuf>> {
    let mut resolved = Vec::new();

    for path in paths {
        if path.is_file() {
            resolved.push(path.clone());
        } else if path.is_dir() {
            let found = directory::find_heic_files(path, recursive).map_err(|e| {
                ConversionError::conversion(ConversionErrorKind::io(
                    e.to_string(),
                    Some(path.clone()),
                ))
            })?;
            log::debug!(
                "found {} HEIC file(s) in {}",
                found.len(),
                path.display()
            );
            resolved.extend(found);
        } else {
            return Err(ConversionError::conversion(ConversionErrorKind::io(
                "Input path does not exist".to_string(),
                Some(path.clone()),
            )));
        }
    }

    Ok(resolved)
}

/// Load every path into memory, preserving order
pub fn load_input_files(paths: &[PathBuf]) -> ConversionResult<Vec<InputFile>> {
    paths.iter().map(|p| InputFile::from_path(p)).collect()
}
