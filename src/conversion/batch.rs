//! Sequential batch conversion with per-file failure tracking

use crate::conversion::engine::{ConversionEngine, OutputFile, Transcoder};
use crate::conversion::stats::ConversionStatistics;
use crate::error::{ConversionError, ConversionResult};
use crate::input::InputFile;
use std::time::Instant;

/// An input that could not be converted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedFile {
    /// Original input name
    pub name: String,
    /// Human-readable cause
    pub reason: String,
}

/// Outcome of one file, reported to progress observers
#[derive(Debug, Clone, Copy)]
pub enum FileOutcome<'a> {
    Converted(&'a OutputFile),
    Failed(&'a FailedFile),
}

impl FileOutcome<'_> {
    /// Log a failed file at warn level; successes are logged by the engine
    pub fn log(&self) {
        if let FileOutcome::Failed(failed) = self {
            log::warn!(
                "An error occurred with file '{}': {}",
                failed.name,
                failed.reason
            );
        }
    }
}

/// Result of converting a batch.
///
/// Every input ends up in exactly one of `outputs` or `failures`, both in
/// input order.
#[derive(Debug, Clone, Default)]
pub struct BatchResult {
    outputs: Vec<OutputFile>,
    failures: Vec<FailedFile>,
    stats: ConversionStatistics,
}

impl BatchResult {
    pub fn outputs(&self) -> &[OutputFile] {
        &self.outputs
    }

    pub fn failures(&self) -> &[FailedFile] {
        &self.failures
    }

    /// Names of the inputs that failed, in input order
    pub fn failed_names(&self) -> Vec<&str> {
        self.failures.iter().map(|f| f.name.as_str()).collect()
    }

    pub fn stats(&self) -> &ConversionStatistics {
        &self.stats
    }

    pub fn is_complete_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Some files converted and some failed
    pub fn is_partial(&self) -> bool {
        !self.outputs.is_empty() && !self.failures.is_empty()
    }

    /// Nothing converted at all
    pub fn is_total_failure(&self) -> bool {
        self.outputs.is_empty() && !self.failures.is_empty()
    }

    /// Combined warning naming every failed file, if any failed
    pub fn failure_message(&self) -> Option<String> {
        if self.failures.is_empty() {
            return None;
        }
        Some(format!(
            "Errors occurred while converting the following files: {}",
            self.failed_names().join(", ")
        ))
    }
}

impl<T: Transcoder> ConversionEngine<T> {
    /// Convert every input in order. See [`convert_batch_with_progress`].
    pub fn convert_batch(&self, inputs: &[InputFile]) -> ConversionResult<BatchResult> {
        convert_batch_with_progress(self, inputs, |outcome| outcome.log())
    }
}

/// Convert `inputs` one after another.
///
/// Fails with `NoInputSelected` on an empty batch without touching the codec.
/// A failing file is recorded and the batch moves on to the next one.
/// `on_file` is called after each file and owns reporting it, typically
/// through [`FileOutcome::log`].
pub fn convert_batch_with_progress<T, F>(
    engine: &ConversionEngine<T>,
    inputs: &[InputFile],
    mut on_file: F,
) -> ConversionResult<BatchResult>
where
    T: Transcoder,
    F: FnMut(FileOutcome<'_>),
{
    if inputs.is_empty() {
        return Err(ConversionError::no_input_selected());
    }

    let start_time = Instant::now();
    let mut result = BatchResult::default();
    let mut input_bytes = 0u64;
    let mut output_bytes = 0u64;

    for input in inputs {
        input_bytes += input.len() as u64;

        match engine.convert(input) {
            Ok(output) => {
                output_bytes += output.len() as u64;
                on_file(FileOutcome::Converted(&output));
                result.outputs.push(output);
            }
            Err(e) => {
                let failed = FailedFile {
                    name: input.name().to_string(),
                    reason: e.user_message(),
                };
                on_file(FileOutcome::Failed(&failed));
                result.failures.push(failed);
            }
        }
    }

    result.stats = ConversionStatistics::for_batch(
        result.outputs.len(),
        result.failures.len(),
        input_bytes,
        output_bytes,
        start_time.elapsed(),
    );

    log::info!(
        "batch finished: {} converted, {} failed",
        result.outputs.len(),
        result.failures.len()
    );

    Ok(result)
}
