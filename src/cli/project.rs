use clap::Args;
use std::path::PathBuf;

/// Location of the project and its settings module
#[derive(Args, Debug, Clone, Default)]
pub struct ProjectArgs {
    /// Project root the settings module is resolved against (defaults to current directory)
    #[arg(long, value_name = "DIR")]
    pub project_dir: Option<PathBuf>,

    /// Dotted settings module, e.g. app.settings
    #[arg(long, value_name = "MODULE", env = "DJANGO_SETTINGS_MODULE")]
    pub settings_module: Option<String>,
}
