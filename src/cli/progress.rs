//! Progress display for a running batch

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Duration;

const TICK_INTERVAL: Duration = Duration::from_millis(120);

/// Owns a progress bar and its background ticker.
///
/// The ticker starts when the guard is created and is stopped, and the bar
/// cleared, when the guard is dropped.
pub struct ProgressGuard {
    bar: ProgressBar,
}

impl ProgressGuard {
    /// Start a bar for `total` files; a quiet guard draws nothing
    pub fn start(total: u64, quiet: bool) -> Self {
        let bar = if quiet {
            ProgressBar::with_draw_target(Some(total), ProgressDrawTarget::hidden())
        } else {
            let bar = ProgressBar::new(total);
            bar.set_style(Self::style());
            bar
        };
        bar.enable_steady_tick(TICK_INTERVAL);

        Self { bar }
    }

    fn style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-")
    }

    /// Advance by one file
    pub fn advance(&self, message: &str) {
        self.bar.set_message(message.to_string());
        self.bar.inc(1);
    }

    /// Run `f` with the bar hidden so it can write to the terminal
    pub fn suspend<F: FnOnce() -> R, R>(&self, f: F) -> R {
        self.bar.suspend(f)
    }
}

impl Drop for ProgressGuard {
    fn drop(&mut self) {
        // Stops the steady ticker thread as well
        self.bar.finish_and_clear();
    }
}
