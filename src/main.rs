use clap::Parser;
use std::path::Path;

use heicconv::archive::{build_archive, ZipArchiver};
use heicconv::cli::path_mapping::map_output_path;
use heicconv::cli::{self, Args, CliConfig, CliResult, CliUtils, ProgressGuard};
use heicconv::conversion::engine::{is_heif_container, HEIF_DECODING_AVAILABLE};
use heicconv::conversion::{
    convert_batch_with_progress, BatchResult, ConversionEngine, FileOutcome,
};
use heicconv::error::{ConversionError, ConversionErrorKind};
use heicconv::input::{self, InputFile};

fn main() {
    let args = Args::parse();

    cli::logging::init(args.verbose, args.quiet);

    let config = match CliConfig::from_args(args) {
        Ok(config) => config,
        Err(e) => {
            cli::handle_error(&e);
            std::process::exit(2);
        }
    };

    if let Err(e) = handle_conversion(&config).and_then(|result| check_outcome(&result)) {
        cli::handle_error(&e);
        std::process::exit(1);
    }
}

/// A batch where every file failed is an error; a partial one is not
fn check_outcome(result: &BatchResult) -> CliResult<()> {
    if result.is_total_failure() {
        return Err(ConversionError::conversion(
            ConversionErrorKind::NothingConverted {
                failed: result.failures().len(),
            },
        ));
    }
    Ok(())
}

/// Refuse HEIF containers up front when this build has no HEIF decoder
fn check_heif_support(inputs: &[InputFile]) -> CliResult<()> {
    if HEIF_DECODING_AVAILABLE {
        return Ok(());
    }

    let heif_names: Vec<&str> = inputs
        .iter()
        .filter(|input| is_heif_container(input.data()))
        .map(|input| input.name())
        .collect();
    if heif_names.is_empty() {
        return Ok(());
    }

    Err(ConversionError::conversion(ConversionErrorKind::configuration(
        format!(
            "this build cannot decode HEIF images ({}); rebuild with `--features heif`",
            heif_names.join(", ")
        ),
    )))
}

fn handle_conversion(config: &CliConfig) -> CliResult<BatchResult> {
    let args = &config.args;

    let paths = input::resolve_input_paths(&args.inputs, args.recursive)?;
    let inputs = input::load_input_files(&paths)?;
    check_heif_support(&inputs)?;

    if !inputs.is_empty() && !config.is_quiet() {
        println!(
            "Converting {} file(s) to {}",
            inputs.len(),
            config.conversion_config.target_format
        );
    }

    let engine = ConversionEngine::with_default_transcoder(config.conversion_config.clone());
    let result = {
        let progress = ProgressGuard::start(inputs.len() as u64, config.is_quiet());
        convert_batch_with_progress(&engine, &inputs, |outcome| {
            progress.suspend(|| outcome.log());
            match outcome {
                FileOutcome::Converted(output) => progress.advance(output.name()),
                FileOutcome::Failed(failed) => progress.advance(&failed.name),
            }
        })?
    };

    let output_dir = config.output_dir();

    if config.write_files() && !result.outputs().is_empty() {
        ensure_dir(&output_dir)?;
        for output in result.outputs() {
            let path = map_output_path(&output_dir, output.name(), "converted");
            write_file(&path, output.data())?;
            CliUtils::show_success(
                &format!(
                    "{} ({})",
                    path.display(),
                    CliUtils::format_file_size(output.len() as u64)
                ),
                config.is_quiet(),
            );
        }
    }

    if let Some(message) = result.failure_message() {
        CliUtils::show_warning(&message);
    }

    if config.want_archive() {
        let bundle = build_archive(result.outputs(), &ZipArchiver::new())?;
        ensure_dir(&output_dir)?;
        let path = map_output_path(&output_dir, &args.archive_name, bundle.default_file_name());
        write_file(&path, bundle.data())?;
        CliUtils::show_success(
            &format!(
                "Archived {} file(s) to {}",
                bundle.entry_names().len(),
                path.display()
            ),
            config.is_quiet(),
        );
    }

    if config.want_stats() {
        output_statistics(&result, args.json, config.is_quiet())?;
    }

    Ok(result)
}

fn ensure_dir(dir: &Path) -> CliResult<()> {
    std::fs::create_dir_all(dir).map_err(|e| io_error(e, dir))
}

fn write_file(path: &Path, data: &[u8]) -> CliResult<()> {
    std::fs::write(path, data).map_err(|e| io_error(e, path))
}

fn io_error(err: std::io::Error, path: &Path) -> ConversionError {
    ConversionError::conversion(ConversionErrorKind::io(
        err.to_string(),
        Some(path.to_path_buf()),
    ))
}

fn output_statistics(result: &BatchResult, json: bool, quiet: bool) -> CliResult<()> {
    let stats = result.stats();

    // JSON is machine output and ignores --quiet
    if json {
        let rendered = stats
            .to_json()
            .map_err(|e| ConversionError::other(anyhow::Error::new(e)))?;
        println!("{}", rendered);
        return Ok(());
    }

    if quiet {
        return Ok(());
    }

    println!("\nConversion Statistics:");
    println!("Converted: {}", stats.converted_count);
    println!("Failed: {}", stats.failed_count);
    println!(
        "Input size: {}",
        CliUtils::format_file_size(stats.input_size_bytes)
    );
    println!(
        "Output size: {}",
        CliUtils::format_file_size(stats.output_size_bytes)
    );
    println!(
        "Processing time: {}",
        CliUtils::format_duration(std::time::Duration::from_millis(stats.processing_time_ms))
    );
    println!("{}", stats.summary());

    Ok(())
}
