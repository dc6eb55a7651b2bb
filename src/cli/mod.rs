//! Command-line interface module

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;

use crate::archive::DEFAULT_ARCHIVE_NAME;
use crate::conversion::config::{DEFAULT_JPEG_QUALITY, DEFAULT_MAX_INPUT_SIZE};
use crate::conversion::{ConversionConfig, TargetFormat};
use crate::error::{ConversionError, ConversionErrorKind, ConversionResult};

pub mod logging;
pub mod path_mapping;
pub mod progress;

pub use progress::ProgressGuard;

const HEIF_SUPPORT_NOTE: &str = if cfg!(feature = "heif") {
    "HEIC/HEIF decoding: enabled (libheif)"
} else {
    "HEIC/HEIF decoding: NOT available in this build. Rebuild with `--features heif` (needs libheif) to convert real HEIC files."
};

/// Main CLI arguments
#[derive(Parser, Debug, Clone)]
#[command(name = "heicconv")]
#[command(about = "Convert HEIC images to PNG or JPEG")]
#[command(version)]
#[command(long_about = None)]
#[command(after_help = HEIF_SUPPORT_NOTE)]
pub struct Args {
    /// Input HEIC files or directories
    #[arg()]
    pub inputs: Vec<PathBuf>,

    /// Target format
    #[arg(short, long, value_enum, default_value_t = Format::Jpeg)]
    pub format: Format,

    /// Output directory (default: current directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Recursively search input directories
    #[arg(short, long)]
    pub recursive: bool,

    /// JPEG quality (1-100, default: 90)
    #[arg(long)]
    pub quality: Option<u8>,

    /// Maximum size of a single input file (e.g., 50MB, default: 100MB)
    #[arg(long)]
    pub max_size: Option<String>,

    /// Bundle all converted files into one zip archive
    #[arg(long)]
    pub archive: bool,

    /// File name of the zip archive
    #[arg(long, default_value = DEFAULT_ARCHIVE_NAME)]
    pub archive_name: String,

    /// Skip writing individual files (only with --archive)
    #[arg(long, requires = "archive")]
    pub no_files: bool,

    /// Output conversion statistics
    #[arg(long)]
    pub stats: bool,

    /// Print statistics as JSON (with --stats)
    #[arg(long, requires = "stats")]
    pub json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Target formats accepted on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    #[value(name = "png")]
    Png,
    #[value(name = "jpeg", alias = "jpg")]
    Jpeg,
}

impl From<Format> for TargetFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Png => TargetFormat::Png,
            Format::Jpeg => TargetFormat::Jpeg,
        }
    }
}

/// CLI configuration
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub args: Args,
    pub conversion_config: ConversionConfig,
}

impl CliConfig {
    /// Create CLI configuration from arguments
    pub fn from_args(args: Args) -> ConversionResult<Self> {
        let conversion_config = Self::create_conversion_config(&args)?;

        Ok(Self {
            args,
            conversion_config,
        })
    }

    /// Create conversion configuration from CLI arguments
    fn create_conversion_config(args: &Args) -> ConversionResult<ConversionConfig> {
        let config = ConversionConfig {
            target_format: args.format.into(),
            jpeg_quality: args.quality.unwrap_or(DEFAULT_JPEG_QUALITY),
            max_input_size: parse_size_limit(&args.max_size)?,
        };

        config
            .validate()
            .map_err(|e| ConversionError::conversion(ConversionErrorKind::configuration(e)))?;

        Ok(config)
    }

    /// Directory converted files and the archive are written to
    pub fn output_dir(&self) -> PathBuf {
        self.args
            .output
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Check if individual converted files should be written
    pub fn write_files(&self) -> bool {
        !self.args.no_files
    }

    /// Check if an archive was requested
    pub fn want_archive(&self) -> bool {
        self.args.archive
    }

    /// Check if quiet mode is enabled
    pub fn is_quiet(&self) -> bool {
        self.args.quiet
    }

    /// Check if stats output is requested
    pub fn want_stats(&self) -> bool {
        self.args.stats
    }
}

/// Parse a size limit string (e.g., "100MB", "1GB", "500KB")
fn parse_size_limit(limit: &Option<String>) -> ConversionResult<usize> {
    let Some(limit_str) = limit else {
        return Ok(DEFAULT_MAX_INPUT_SIZE);
    };

    let limit_str = limit_str.trim().to_uppercase();
    let invalid = || {
        ConversionError::conversion(ConversionErrorKind::Configuration {
            message: format!("Invalid size limit: {}", limit_str),
        })
    };

    let (number, multiplier) = if let Some(n) = limit_str.strip_suffix("GB") {
        (n, 1024.0 * 1024.0 * 1024.0)
    } else if let Some(n) = limit_str.strip_suffix("MB") {
        (n, 1024.0 * 1024.0)
    } else if let Some(n) = limit_str.strip_suffix("KB") {
        (n, 1024.0)
    } else if let Some(n) = limit_str.strip_suffix('B') {
        (n, 1.0)
    } else {
        // Assume bytes
        (limit_str.as_str(), 1.0)
    };

    let value = number.trim().parse::<f64>().map_err(|_| invalid())?;
    if value < 0.0 {
        return Err(invalid());
    }
    Ok((value * multiplier) as usize)
}

/// CLI utilities and helpers
pub struct CliUtils;

impl CliUtils {
    /// Format a file size in human-readable format
    pub fn format_file_size(bytes: u64) -> String {
        const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
        let mut size = bytes as f64;
        let mut unit_index = 0;

        while size >= 1024.0 && unit_index < UNITS.len() - 1 {
            size /= 1024.0;
            unit_index += 1;
        }

        if unit_index == 0 {
            format!("{} {}", bytes, UNITS[unit_index])
        } else {
            format!("{:.1} {}", size, UNITS[unit_index])
        }
    }

    /// Format a duration in human-readable format
    pub fn format_duration(duration: Duration) -> String {
        let total_millis = duration.as_millis();

        if total_millis < 1000 {
            format!("{}ms", total_millis)
        } else if total_millis < 60_000 {
            format!("{:.1}s", total_millis as f64 / 1000.0)
        } else {
            let minutes = total_millis / 60_000;
            let seconds = (total_millis % 60_000) / 1000;
            format!("{}m {}s", minutes, seconds)
        }
    }

    /// Show a success message (if not in quiet mode)
    pub fn show_success(message: &str, quiet: bool) {
        if !quiet {
            println!("{} {}", Self::paint(console::style("✓").green()), message);
        }
    }

    /// Show an error message
    pub fn show_error(message: &str) {
        eprintln!("{} {}", Self::paint(console::style("✗").red()), message);
    }

    /// Show a warning message. Warnings are printed even in quiet mode.
    pub fn show_warning(message: &str) {
        eprintln!("{} {}", Self::paint(console::style("⚠").yellow()), message);
    }

    /// Check if output should be colored
    pub fn should_use_color() -> bool {
        atty::is(atty::Stream::Stdout) && std::env::var("NO_COLOR").is_err()
    }

    fn paint(styled: console::StyledObject<&str>) -> console::StyledObject<&str> {
        styled.force_styling(Self::should_use_color())
    }
}

/// Handle CLI errors with user-friendly messages
pub fn handle_error(error: &ConversionError) {
    let message = error.user_message();
    CliUtils::show_error(&message);

    // Provide helpful suggestions
    match error.kind() {
        Some(ConversionErrorKind::NoInputSelected) => {
            eprintln!("\nTip: Pass HEIC files or a directory containing them (use --recursive for nested folders)");
        }
        Some(ConversionErrorKind::InputTooLarge { .. }) => {
            eprintln!("\nTip: Use --max-size to raise the per-file limit");
        }
        _ => {}
    }

    // Show usage hint
    eprintln!("\nTry 'heicconv --help' for usage information.");
}

/// Command execution result
pub type CliResult<T> = Result<T, ConversionError>;
