//! Progress display for package commands
//!
//! All progress reporting goes through the [`CommandProgress`] trait so that
//! non-interactive runs (container logs, tests) stay free of spinner output.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Progress reporting for a single blocking command
pub trait CommandProgress {
    /// Show that `label` has started
    fn start(&mut self, label: &str);

    /// Clear the display after the command finished
    fn finish(&mut self);
}

/// Spinner shown on an interactive terminal
#[derive(Default)]
pub struct SpinnerProgress {
    spinner: Option<ProgressBar>,
}

impl CommandProgress for SpinnerProgress {
    fn start(&mut self, label: &str) {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
            spinner.set_style(style);
        }
        spinner.set_message(label.to_string());
        spinner.enable_steady_tick(Duration::from_millis(100));
        self.spinner = Some(spinner);
    }

    fn finish(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }
}

/// No-op progress for non-interactive output
#[derive(Default)]
pub struct SilentProgress;

impl CommandProgress for SilentProgress {
    fn start(&mut self, _label: &str) {}

    fn finish(&mut self) {}
}

/// Pick a spinner when stdout is attended, silent progress otherwise
pub fn for_terminal() -> Box<dyn CommandProgress> {
    if console::user_attended() {
        Box::new(SpinnerProgress::default())
    } else {
        Box::new(SilentProgress)
    }
}
