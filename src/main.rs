//! pdd - development container bootstrap
//!
//! Installs the pip and OS packages a project declares in `pdd.yaml`, sets
//! additional environment variables and injects extra apps and settings into
//! a Django settings module. A guard flag makes repeated runs no-ops.

use clap::Parser;
use miette::Diagnostic;

mod cli;
mod commands;
mod config;
mod error;
mod installer;
mod operations;
mod settings;
mod state;
mod ui;

use cli::{Cli, Commands};
use error::PddError;
use ui::Reporter;

/// Print a failed run: captured package manager output, the error, its help
fn report_error(reporter: Reporter, err: &PddError) {
    if let Some(output) = err.captured_output() {
        reporter.error("Package manager output:");
        eprintln!("{output}");
    }
    eprintln!("Error: {err}");
    if let Some(help) = err.help() {
        eprintln!("  help: {help}");
    }
}

fn main() {
    let cli = Cli::parse();
    let reporter = Reporter::new(cli.debug);

    let result = match cli.command {
        Commands::Install(args) => commands::install::run(cli.path, args, reporter),
        Commands::Status(args) => commands::status::run(cli.path, args),
        Commands::Restore(args) => commands::restore::run(cli.path, args, reporter),
        Commands::Reset => commands::reset::run(cli.path, reporter),
        Commands::Hook(args) => commands::hook::run(cli.path, args, reporter),
        Commands::Completions(args) => commands::completions::run(args),
    };

    if let Err(e) = result {
        report_error(reporter, &e);
        std::process::exit(e.exit_code());
    }
}
