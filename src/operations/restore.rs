//! Restore operation module
//!
//! Operator rollback: the backup written by the first install replaces the
//! settings file and the guard marker is cleared, so the next install starts
//! from the original again.

use super::ProjectPaths;
use crate::error::Result;
use crate::settings::patcher;
use crate::state::{INSTALLED_ENV, InstallState};
use crate::ui::Reporter;

/// High-level restore operation
pub struct RestoreOperation<'a> {
    paths: &'a ProjectPaths,
    state: &'a mut InstallState,
    reporter: Reporter,
}

impl<'a> RestoreOperation<'a> {
    pub fn new(paths: &'a ProjectPaths, state: &'a mut InstallState, reporter: Reporter) -> Self {
        Self {
            paths,
            state,
            reporter,
        }
    }

    /// Execute restore operation
    pub fn execute(&mut self) -> Result<()> {
        let settings = self.paths.settings_file()?;
        patcher::restore(&settings)?;
        self.reporter.info(format!(
            "Restored {} from {}",
            settings.path().display(),
            settings.backup_path().display()
        ));

        if self.state.reset()? {
            self.reporter.info(format!(
                "Removed install marker {}",
                self.state.marker_path().display()
            ));
        }
        if self.state.is_set_by_environment() {
            self.reporter.warn(format!(
                "{INSTALLED_ENV} is still set in the environment; unset it before installing again"
            ));
        }
        Ok(())
    }
}
