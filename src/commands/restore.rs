//! Restore command implementation

use std::path::PathBuf;

use crate::cli::ProjectArgs;
use crate::commands::helpers;
use crate::error::Result;
use crate::operations::RestoreOperation;
use crate::state::InstallState;
use crate::ui::Reporter;

/// Run restore command
pub fn run(pdd_path: Option<PathBuf>, args: ProjectArgs, reporter: Reporter) -> Result<()> {
    let paths = helpers::project_paths(pdd_path, args)?;
    let mut state = InstallState::load(paths.pdd_dir());
    RestoreOperation::new(&paths, &mut state, reporter).execute()
}
