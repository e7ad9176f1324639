//! Status command implementation

use std::path::PathBuf;

use crate::cli::StatusArgs;
use crate::commands::helpers;
use crate::error::Result;
use crate::operations::StatusOperation;
use crate::state::InstallState;

/// Run status command
pub fn run(pdd_path: Option<PathBuf>, args: StatusArgs) -> Result<()> {
    let paths = helpers::project_paths(pdd_path, args.project)?;
    let state = InstallState::load(paths.pdd_dir());
    StatusOperation::new(&paths, &state).execute(args.json)
}
