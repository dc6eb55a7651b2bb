//! Statistics for conversion batches

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Statistics collected over a conversion batch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionStatistics {
    /// Number of files converted
    pub converted_count: usize,
    /// Number of files that failed
    pub failed_count: usize,
    /// Total input size in bytes, failed files included
    pub input_size_bytes: u64,
    /// Total output size in bytes
    pub output_size_bytes: u64,
    /// Processing time in milliseconds
    pub processing_time_ms: u64,
    /// Average time per file
    pub avg_time_per_file_ms: f32,
    /// Output size as a percentage of input size
    pub size_ratio_percent: f32,
    /// Timestamp of when statistics were collected
    pub collected_at: chrono::DateTime<chrono::Utc>,
}

impl Default for ConversionStatistics {
    fn default() -> Self {
        Self {
            converted_count: 0,
            failed_count: 0,
            input_size_bytes: 0,
            output_size_bytes: 0,
            processing_time_ms: 0,
            avg_time_per_file_ms: 0.0,
            size_ratio_percent: 0.0,
            collected_at: chrono::Utc::now(),
        }
    }
}

impl ConversionStatistics {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Create statistics for a finished batch
    pub fn for_batch(
        converted: usize,
        failed: usize,
        input_size: u64,
        output_size: u64,
        processing_time: Duration,
    ) -> Self {
        let mut stats = Self {
            converted_count: converted,
            failed_count: failed,
            input_size_bytes: input_size,
            output_size_bytes: output_size,
            processing_time_ms: processing_time.as_millis() as u64,
            ..Self::default()
        };
        stats.recalculate();
        stats
    }

    /// Total number of files seen
    pub fn file_count(&self) -> usize {
        self.converted_count + self.failed_count
    }

    fn recalculate(&mut self) {
        self.avg_time_per_file_ms = if self.file_count() > 0 {
            self.processing_time_ms as f32 / self.file_count() as f32
        } else {
            0.0
        };

        self.size_ratio_percent = if self.input_size_bytes > 0 {
            (self.output_size_bytes as f32 / self.input_size_bytes as f32) * 100.0
        } else {
            0.0
        };
    }

    /// Get a formatted summary
    pub fn summary(&self) -> String {
        format!(
            "Converted {} of {} files in {:.1}s - output is {:.1}% of input size",
            self.converted_count,
            self.file_count(),
            self.processing_time_ms as f32 / 1000.0,
            self.size_ratio_percent
        )
    }

    /// Export to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Import from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
