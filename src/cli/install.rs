use clap::Parser;

use super::ProjectArgs;

/// Arguments for the install command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                   Bootstrap the container:\n    pdd install\n\n\
                   Use an explicit settings module:\n    pdd install --settings-module app.settings\n\n\
                   Preview without changing anything:\n    pdd install --dry-run")]
pub struct InstallArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Show what would be installed and injected without doing it
    #[arg(long)]
    pub dry_run: bool,
}
