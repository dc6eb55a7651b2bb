//! Bundling converted files into a single archive

use crate::conversion::OutputFile;
use crate::error::{ConversionError, ConversionErrorKind, ConversionResult};
use anyhow::Context;
use std::io::{Cursor, Write};
use zip::write::{FileOptions, ZipWriter};
use zip::CompressionMethod;

/// File name used when the caller does not pick one
pub const DEFAULT_ARCHIVE_NAME: &str = "converted_images.zip";

/// One named blob to be packed
#[derive(Debug, Clone, Copy)]
pub struct ArchiveEntry<'a> {
    pub name: &'a str,
    pub data: &'a [u8],
}

/// Packing capability: turns named blobs into one archive blob
pub trait Archiver {
    fn pack(&self, entries: &[ArchiveEntry<'_>]) -> anyhow::Result<Vec<u8>>;
}

/// Zip archiver. Entries are written in order under their names as given.
#[derive(Debug, Clone, Copy)]
pub struct ZipArchiver {
    compression: CompressionMethod,
}

impl Default for ZipArchiver {
    fn default() -> Self {
        Self {
            compression: CompressionMethod::Deflated,
        }
    }
}

impl ZipArchiver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store entries without compression; PNG/JPEG data rarely shrinks further
    pub fn stored() -> Self {
        Self {
            compression: CompressionMethod::Stored,
        }
    }
}

impl Archiver for ZipArchiver {
    fn pack(&self, entries: &[ArchiveEntry<'_>]) -> anyhow::Result<Vec<u8>> {
        let mut buffer = Vec::new();
        {
            let mut zip = ZipWriter::new(Cursor::new(&mut buffer));
            let options = FileOptions::default()
                .compression_method(self.compression)
                .unix_permissions(0o644);

            for entry in entries {
                zip.start_file(entry.name, options)
                    .with_context(|| format!("Failed to add file to ZIP: {}", entry.name))?;
                zip.write_all(entry.data)
                    .with_context(|| format!("Failed to write file data to ZIP: {}", entry.name))?;
            }

            zip.finish().context("Failed to finalize ZIP archive")?;
        }

        Ok(buffer)
    }
}

/// A packed archive of converted files
#[derive(Debug, Clone)]
pub struct ArchiveBundle {
    data: Vec<u8>,
    entry_names: Vec<String>,
}

impl ArchiveBundle {
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Names of the packed entries, in the order they were written
    pub fn entry_names(&self) -> &[String] {
        &self.entry_names
    }

    pub fn default_file_name(&self) -> &'static str {
        DEFAULT_ARCHIVE_NAME
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }
}

/// Pack every output under its derived name.
///
/// Fails with `EmptyArchiveRequest` on an empty slice without calling the
/// archiver. Names are neither prefixed nor deduplicated; colliding names
/// become separate entries with the same name.
pub fn build_archive<A: Archiver>(
    outputs: &[OutputFile],
    archiver: &A,
) -> ConversionResult<ArchiveBundle> {
    if outputs.is_empty() {
        return Err(ConversionError::empty_archive_request());
    }

    let entries: Vec<ArchiveEntry<'_>> = outputs
        .iter()
        .map(|output| ArchiveEntry {
            name: output.name(),
            data: output.data(),
        })
        .collect();

    let data = archiver.pack(&entries).map_err(|e| {
        ConversionError::conversion_with_source(
            ConversionErrorKind::archive(format!("failed to pack {} file(s)", entries.len())),
            e,
        )
    })?;

    log::debug!("packed {} file(s) into {} bytes", entries.len(), data.len());

    Ok(ArchiveBundle {
        data,
        entry_names: outputs.iter().map(|o| o.name().to_string()).collect(),
    })
}
