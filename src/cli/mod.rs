//! CLI definitions using clap derive API
//!
//! This module is organized into submodules for each command's argument types:
//! - project: Project location arguments shared by install, status and restore
//! - install: Install command arguments
//! - status: Status command arguments
//! - hook: Hook command arguments
//! - completions: Completions command arguments

use clap::builder::{Styles, styling::AnsiColor};
use clap::{ArgAction, Parser, Subcommand};
use std::convert::Infallible;
use std::path::PathBuf;

use crate::ui::is_truthy;

pub mod completions;
pub mod hook;
pub mod install;
pub mod project;
pub mod status;

pub use completions::CompletionsArgs;
pub use hook::HookArgs;
pub use install::InstallArgs;
pub use project::ProjectArgs;
pub use status::StatusArgs;

/// pdd - development container bootstrap
///
/// Installs declared pip and OS packages and injects apps and settings into a
/// Django settings module, once per container.
#[derive(Parser, Debug)]
#[command(
    name = "pdd",
    author,
    version,
    color = clap::ColorChoice::Always,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Idempotent package install and settings injection for development containers",
    long_about = "pdd reads pdd.yaml, installs the pip and OS packages it declares, sets \
                  additional environment variables and appends extra apps and settings to \
                  the Django settings module. A guard flag makes repeated runs no-ops.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  pdd install                              \x1b[90m# Bootstrap using PDD_PATH and DJANGO_SETTINGS_MODULE\x1b[0m\n   \
                  pdd --path /pdd install --dry-run        \x1b[90m# Show what would be done\x1b[0m\n   \
                  pdd status                               \x1b[90m# Show guard and settings state\x1b[0m\n   \
                  pdd restore                              \x1b[90m# Put the original settings back\x1b[0m\n   \
                  pdd reset                                \x1b[90m# Allow the next install to run again\x1b[0m\n   \
                  pdd hook                                 \x1b[90m# Run install whenever Python starts\x1b[0m\n\n\
                  "
)]
pub struct Cli {
    /// Directory holding pdd.yaml and the install marker (defaults to current directory)
    #[arg(long, short = 'p', global = true, env = "PDD_PATH")]
    pub path: Option<PathBuf>,

    /// Enable debug output
    #[arg(
        long,
        short = 'd',
        global = true,
        env = "PDD_DEBUG",
        action = ArgAction::SetTrue,
        value_parser = parse_debug_flag
    )]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Unrecognised `PDD_DEBUG` values turn debug output off instead of failing
fn parse_debug_flag(value: &str) -> Result<bool, Infallible> {
    Ok(is_truthy(value))
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Install packages and inject settings unless already installed
    Install(InstallArgs),

    /// Show install guard, config and settings state
    Status(StatusArgs),

    /// Restore the settings module from its backup and clear the guard
    Restore(ProjectArgs),

    /// Clear the install marker so the next install runs again
    Reset,

    /// Run install automatically at Python start-up via sitecustomize.py
    Hook(HookArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}
