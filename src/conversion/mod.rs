//! HEIC conversion module
//!
//! This module contains the core conversion logic, configuration, batching
//! and statistics.

pub mod batch;
pub mod config;
pub mod engine;
pub mod limits;
pub mod naming;
pub mod stats;

pub use batch::{convert_batch_with_progress, BatchResult, FailedFile, FileOutcome};
pub use config::{ConversionConfig, TargetFormat};
pub use engine::{
    CodecStage, ConversionEngine, ConversionRequest, ImageTranscoder, OutputFile, Transcoder,
};
pub use naming::derive_output_name;
pub use stats::ConversionStatistics;

pub use crate::error::ConversionResult;
