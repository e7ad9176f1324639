//! Reset command implementation

use std::path::PathBuf;

use crate::commands::helpers;
use crate::error::Result;
use crate::state::{INSTALLED_ENV, InstallState};
use crate::ui::Reporter;

/// Run reset command
pub fn run(pdd_path: Option<PathBuf>, reporter: Reporter) -> Result<()> {
    let pdd_dir = helpers::resolve_dir(pdd_path)?;
    let mut state = InstallState::load(&pdd_dir);

    if state.reset()? {
        reporter.info(format!(
            "Removed install marker {}",
            state.marker_path().display()
        ));
    } else {
        reporter.info("No install marker to remove");
    }
    if state.is_set_by_environment() {
        reporter.warn(format!(
            "{INSTALLED_ENV} is still set in the environment; unset it before installing again"
        ));
    }
    Ok(())
}
