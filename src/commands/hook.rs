//! Hook command implementation

use std::path::PathBuf;

use crate::cli::HookArgs;
use crate::commands::helpers;
use crate::error::{PddError, Result};
use crate::installer::SystemBackend;
use crate::operations::{HookOperation, HookOptions};
use crate::ui::Reporter;

/// Run hook command
pub fn run(pdd_path: Option<PathBuf>, args: HookArgs, reporter: Reporter) -> Result<()> {
    let pdd_dir = std::path::absolute(helpers::resolve_dir(pdd_path)?)?;
    let pdd_exe = std::env::current_exe().map_err(|e| PddError::IoError {
        message: format!("Failed to locate the pdd executable: {e}"),
    })?;
    let target = match args.site_packages {
        Some(dir) => dir,
        None => SystemBackend::from_env(reporter).site_packages()?,
    };

    let options = HookOptions { force: args.force };
    HookOperation::new(&pdd_dir, &pdd_exe, reporter).execute(&target, &options)?;
    Ok(())
}
