//! UI presentation layer
//!
//! This module handles:
//! - Leveled console messages prefixed with `[pdd]` ([`Reporter`])
//! - Spinners while long-running package commands execute ([`progress`])
//!
//! Colors come from `console`, which drops styling on its own when the
//! target stream is not a terminal.

pub mod progress;

use std::fmt::Display;

use console::Style;

const PREFIX: &str = "[pdd]";

/// Leveled console reporter
///
/// Info and debug go to stdout, warn and error to stderr. Debug messages are
/// only emitted when the reporter was created with debug enabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct Reporter {
    debug: bool,
}

impl Reporter {
    /// Create a reporter, optionally emitting debug messages
    pub fn new(debug: bool) -> Self {
        Self { debug }
    }

    pub fn info(&self, message: impl Display) {
        println!("{} {message}", Style::new().cyan().apply_to(PREFIX));
    }

    pub fn warn(&self, message: impl Display) {
        eprintln!(
            "{} {message}",
            Style::new().yellow().bold().for_stderr().apply_to(PREFIX)
        );
    }

    pub fn error(&self, message: impl Display) {
        eprintln!(
            "{} {message}",
            Style::new().red().bold().for_stderr().apply_to(PREFIX)
        );
    }

    pub fn debug(&self, message: impl Display) {
        if self.debug {
            println!("{} {message}", Style::new().blue().apply_to(PREFIX));
        }
    }
}

/// Parse a boolean flag value as found in environment variables
///
/// Accepts `1`, `true`, `yes` and `on` in any case; anything else is false.
pub fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
