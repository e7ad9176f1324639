use clap::Parser;
use std::path::PathBuf;

/// Arguments for the hook command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                   Run the bootstrap whenever Python starts:\n    pdd hook\n\n\
                   Write the hook into an explicit package directory:\n    pdd hook --site-packages /usr/local/lib/python3.12/site-packages")]
pub struct HookArgs {
    /// Directory to write sitecustomize.py into (defaults to the interpreter's site-packages)
    #[arg(long, value_name = "DIR")]
    pub site_packages: Option<PathBuf>,

    /// Replace an existing sitecustomize.py that pdd did not write
    #[arg(long)]
    pub force: bool,
}
