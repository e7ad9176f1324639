use clap::Parser;

use super::ProjectArgs;

/// Arguments for the status command
#[derive(Parser, Debug)]
pub struct StatusArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}
