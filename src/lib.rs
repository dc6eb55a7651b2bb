//! HEIC Converter
//!
//! A Rust CLI tool and library for converting batches of HEIC images to PNG
//! or JPEG, with per-file failure tracking and optional zip bundling of the
//! converted files.

pub mod archive;
pub mod cli;
pub mod conversion;
pub mod error;
pub mod input;

// Re-export commonly used types
pub use archive::{build_archive, ArchiveBundle, Archiver, ZipArchiver, DEFAULT_ARCHIVE_NAME};
pub use conversion::{
    BatchResult, ConversionConfig, ConversionEngine, ImageTranscoder, OutputFile, TargetFormat,
    Transcoder,
};
pub use error::{ConversionError, ConversionErrorKind, ConversionResult};
pub use input::InputFile;

/// Convert a batch with the built-in image transcoder
pub fn convert_files(
    inputs: &[InputFile],
    config: &ConversionConfig,
) -> ConversionResult<BatchResult> {
    ConversionEngine::with_default_transcoder(config.clone()).convert_batch(inputs)
}

/// Bundle converted files into a zip archive
pub fn zip_outputs(outputs: &[OutputFile]) -> ConversionResult<ArchiveBundle> {
    build_archive(outputs, &ZipArchiver::new())
}
