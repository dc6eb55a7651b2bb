//! Core conversion engine: decode an input image and re-encode it

use crate::conversion::config::{ConversionConfig, TargetFormat};
use crate::conversion::limits;
use crate::conversion::naming::derive_output_name;
use crate::error::{ConversionError, ConversionErrorKind, ConversionResult};
use crate::input::InputFile;
use anyhow::Context;
use image::DynamicImage;
use std::io::Cursor;
use std::time::Instant;

/// Decode-and-reencode capability.
///
/// Takes the raw input blob and the target format and returns the encoded
/// output blob. Implementations may fail per input.
pub trait Transcoder {
    fn transcode(&self, data: &[u8], target: TargetFormat) -> anyhow::Result<Vec<u8>>;
}

impl<F> Transcoder for F
where
    F: Fn(&[u8], TargetFormat) -> anyhow::Result<Vec<u8>>,
{
    fn transcode(&self, data: &[u8], target: TargetFormat) -> anyhow::Result<Vec<u8>> {
        self(data, target)
    }
}

/// Codec step a transcoder failed in.
///
/// Attach it as the outermost context of a transcode error so the engine
/// can report decode and encode failures apart. Untagged errors count as
/// decode failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CodecStage {
    #[error("decoding failed")]
    Decode,
    #[error("encoding failed")]
    Encode,
}

/// Whether this build can decode HEIF containers
pub const HEIF_DECODING_AVAILABLE: bool = cfg!(feature = "heif");

/// Brands found in the `ftyp` box of HEIC/HEIF files
const HEIF_BRANDS: &[&[u8; 4]] = &[
    b"heic", b"heix", b"hevc", b"hevx", b"heim", b"heis", b"hevm", b"hevs", b"mif1", b"msf1",
];

/// Check whether a blob starts with an ISO-BMFF `ftyp` box carrying a HEIF brand
pub fn is_heif_container(data: &[u8]) -> bool {
    if data.len() < 12 || &data[4..8] != b"ftyp" {
        return false;
    }
    HEIF_BRANDS.iter().any(|brand| &data[8..12] == *brand)
}

/// Transcoder backed by the `image` crate, with libheif for HEIF containers
/// when built with the `heif` feature.
#[derive(Debug, Clone)]
pub struct ImageTranscoder {
    jpeg_quality: u8,
}

impl Default for ImageTranscoder {
    fn default() -> Self {
        Self {
            jpeg_quality: crate::conversion::config::DEFAULT_JPEG_QUALITY,
        }
    }
}

impl ImageTranscoder {
    pub fn new(jpeg_quality: u8) -> Self {
        Self { jpeg_quality }
    }

    pub fn from_config(config: &ConversionConfig) -> Self {
        Self::new(config.jpeg_quality)
    }

    fn decode(&self, data: &[u8]) -> anyhow::Result<DynamicImage> {
        if is_heif_container(data) {
            return decode_heif(data);
        }
        image::load_from_memory(data).context("unrecognised or corrupt image data")
    }

    fn encode(&self, img: &DynamicImage, target: TargetFormat) -> anyhow::Result<Vec<u8>> {
        let (width, height) = (img.width(), img.height());
        let mut buffer = Vec::with_capacity(width as usize * height as usize * 3);

        match target {
            TargetFormat::Png => {
                img.write_to(&mut Cursor::new(&mut buffer), target.to_image_format())
                    .context("PNG encoding failed")?;
            }
            TargetFormat::Jpeg => {
                // JPEG has no alpha channel
                let rgb = DynamicImage::ImageRgb8(img.to_rgb8());
                let encoder =
                    image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buffer, self.jpeg_quality);
                rgb.write_with_encoder(encoder)
                    .context("JPEG encoding failed")?;
            }
        }

        Ok(buffer)
    }
}

impl Transcoder for ImageTranscoder {
    fn transcode(&self, data: &[u8], target: TargetFormat) -> anyhow::Result<Vec<u8>> {
        let img = self.decode(data).context(CodecStage::Decode)?;
        self.encode(&img, target).context(CodecStage::Encode)
    }
}

#[cfg(feature = "heif")]
fn decode_heif(data: &[u8]) -> anyhow::Result<DynamicImage> {
    use libheif_rs::{ColorSpace, HeifContext, LibHeif, RgbChroma};

    let lib_heif = LibHeif::new();
    let ctx = HeifContext::read_from_bytes(data).context("invalid HEIF container")?;
    let handle = ctx
        .primary_image_handle()
        .context("HEIF container has no primary image")?;
    let decoded = lib_heif
        .decode(&handle, ColorSpace::Rgb(RgbChroma::Rgba), None)
        .context("HEIF decoding failed")?;

    let plane = decoded
        .planes()
        .interleaved
        .ok_or_else(|| anyhow::anyhow!("decoded HEIF image has no interleaved plane"))?;

    let row_len = plane.width as usize * 4;
    let mut pixels = Vec::with_capacity(row_len * plane.height as usize);
    for row in plane.data.chunks(plane.stride).take(plane.height as usize) {
        pixels.extend_from_slice(&row[..row_len]);
    }

    let rgba = image::RgbaImage::from_raw(plane.width, plane.height, pixels)
        .ok_or_else(|| anyhow::anyhow!("decoded HEIF plane has unexpected size"))?;
    Ok(DynamicImage::ImageRgba8(rgba))
}

#[cfg(not(feature = "heif"))]
fn decode_heif(_data: &[u8]) -> anyhow::Result<DynamicImage> {
    anyhow::bail!("HEIF decoding is not available in this build (enable the `heif` feature)")
}

/// Pairing of an input with the format it should be converted to
#[derive(Debug, Clone, Copy)]
pub struct ConversionRequest<'a> {
    pub input: &'a InputFile,
    pub target: TargetFormat,
}

impl<'a> ConversionRequest<'a> {
    pub fn new(input: &'a InputFile, target: TargetFormat) -> Self {
        Self { input, target }
    }

    /// Name the converted file will carry
    pub fn output_name(&self) -> String {
        derive_output_name(self.input.name(), self.target)
    }
}

/// A converted image: encoded blob, derived name and target media type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFile {
    name: String,
    media_type: &'static str,
    data: Vec<u8>,
}

impl OutputFile {
    pub fn new(name: impl Into<String>, target: TargetFormat, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            media_type: target.media_type(),
            data,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn media_type(&self) -> &str {
        self.media_type
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

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }
}

/// Main conversion engine
pub struct ConversionEngine<T: Transcoder> {
    config: ConversionConfig,
    transcoder: T,
}

impl ConversionEngine<ImageTranscoder> {
    /// Create an engine using the built-in image transcoder
    pub fn with_default_transcoder(config: ConversionConfig) -> Self {
        let transcoder = ImageTranscoder::from_config(&config);
        Self::new(config, transcoder)
    }
}

impl<T: Transcoder> ConversionEngine<T> {
    pub fn new(config: ConversionConfig, transcoder: T) -> Self {
        Self { config, transcoder }
    }

    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    pub fn target_format(&self) -> TargetFormat {
        self.config.target_format
    }

    /// Convert a single input to the configured target format
    pub fn convert(&self, input: &InputFile) -> ConversionResult<OutputFile> {
        self.convert_request(&ConversionRequest::new(input, self.config.target_format))
    }

    /// Convert one request
    pub fn convert_request(&self, request: &ConversionRequest<'_>) -> ConversionResult<OutputFile> {
        let start_time = Instant::now();

        limits::check_input_size(request.input, &self.config)?;

        let data = self
            .transcoder
            .transcode(request.input.data(), request.target)
            .map_err(|e| {
                let name = request.input.name();
                let kind = match e.downcast_ref::<CodecStage>() {
                    Some(CodecStage::Encode) => ConversionErrorKind::encode(
                        name,
                        format!("could not write {}", request.target),
                    ),
                    _ => ConversionErrorKind::decode(name, "unreadable image"),
                };
                ConversionError::conversion_with_source(kind, e)
            })?;

        let output = OutputFile::new(request.output_name(), request.target, data);
        log::debug!(
            "converted {} -> {} ({} -> {} bytes, {}ms)",
            request.input.name(),
            output.name(),
            request.input.len(),
            output.len(),
            start_time.elapsed().as_millis()
        );

        Ok(output)
    }
}
