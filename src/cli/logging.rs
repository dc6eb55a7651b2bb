use env_logger::{Builder, Env, WriteStyle};
use std::io::Write;

/// Level used when RUST_LOG is not set
pub fn default_level(verbose: bool, quiet: bool) -> &'static str {
    if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    }
}

/// Initialise the global logger. `RUST_LOG` takes precedence over the flags.
pub fn init(verbose: bool, quiet: bool) {
    let env = Env::default().default_filter_or(default_level(verbose, quiet));

    let write_style = if super::CliUtils::should_use_color() {
        WriteStyle::Auto
    } else {
        WriteStyle::Never
    };

    let result = Builder::from_env(env)
        .write_style(write_style)
        .format(|buf, record| {
            let level_style = buf.default_level_style(record.level());
            writeln!(
                buf,
                "[{} {level_style}{}{level_style:#}] {}",
                buf.timestamp_seconds(),
                record.level(),
                record.args()
            )
        })
        .try_init();

    if let Err(e) = result {
        eprintln!("logger already initialised: {}", e);
    }
}
