//! Configuration options for HEIC conversion

use std::fmt;
use std::str::FromStr;

/// Default per-file input limit (100MB)
pub const DEFAULT_MAX_INPUT_SIZE: usize = 100 * 1024 * 1024;

/// Default JPEG encoder quality
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Raster formats a batch can be converted to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TargetFormat {
    /// Portable Network Graphics
    Png,
    /// JPEG
    #[default]
    Jpeg,
}

impl TargetFormat {
    /// File extension written on converted files, without the dot
    pub fn extension(&self) -> &'static str {
        match self {
            TargetFormat::Png => "png",
            TargetFormat::Jpeg => "jpeg",
        }
    }

    pub fn media_type(&self) -> &'static str {
        match self {
            TargetFormat::Png => "image/png",
            TargetFormat::Jpeg => "image/jpeg",
        }
    }

    pub fn to_image_format(self) -> image::ImageFormat {
        match self {
            TargetFormat::Png => image::ImageFormat::Png,
            TargetFormat::Jpeg => image::ImageFormat::Jpeg,
        }
    }
}

impl FromStr for TargetFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "png" | "image/png" => Ok(TargetFormat::Png),
            "jpeg" | "jpg" | "image/jpeg" => Ok(TargetFormat::Jpeg),
            other => Err(format!(
                "Invalid target format '{}'. Use 'png' or 'jpeg'",
                other
            )),
        }
    }
}

impl fmt::Display for TargetFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.extension().to_uppercase())
    }
}

/// Conversion configuration options
#[derive(Debug, Clone)]
pub struct ConversionConfig {
    /// Format every file in the batch is converted to
    pub target_format: TargetFormat,
    /// JPEG encoder quality (1-100), ignored for PNG
    pub jpeg_quality: u8,
    /// Largest input blob accepted, in bytes
    pub max_input_size: usize,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            target_format: TargetFormat::default(),
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            max_input_size: DEFAULT_MAX_INPUT_SIZE,
        }
    }
}

impl ConversionConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the target format
    pub fn with_target_format(mut self, format: TargetFormat) -> Self {
        self.target_format = format;
        self
    }

    /// Set JPEG quality
    pub fn with_jpeg_quality(mut self, quality: u8) -> Result<Self, String> {
        if !(1..=100).contains(&quality) {
            return Err("JPEG quality must be 1-100".to_string());
        }
        self.jpeg_quality = quality;
        Ok(self)
    }

    /// Set the per-file input size limit
    pub fn with_max_input_size(mut self, limit_bytes: usize) -> Self {
        self.max_input_size = limit_bytes;
        self
    }

    /// Validate configuration consistency
    pub fn validate(&self) -> Result<(), String> {
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err("JPEG quality must be 1-100".to_string());
        }

        if self.max_input_size < 1024 {
            return Err("Maximum input size must be at least 1KB".to_string());
        }

        Ok(())
    }
}
