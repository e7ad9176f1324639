//! Install guard flag
//!
//! The guard records that the whole workflow has completed. It is read from
//! `PDD_IS_INSTALLED` and from a marker file inside the pdd directory, so a
//! freshly started process in the same container sees it too.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, fs as fs_error};
use crate::ui::is_truthy;

/// Environment variable carrying the guard flag
pub const INSTALLED_ENV: &str = "PDD_IS_INSTALLED";

/// Marker file written once the workflow completed
pub const MARKER_FILE_NAME: &str = ".pdd-installed";

/// Persisted "already installed" state
#[derive(Debug, Clone)]
pub struct InstallState {
    env_flag: bool,
    marker_path: PathBuf,
    installed: bool,
}

impl InstallState {
    /// Load the guard from the process environment and the marker file
    pub fn load(pdd_dir: &Path) -> Self {
        let env_flag = env::var(INSTALLED_ENV)
            .map(|value| is_truthy(&value))
            .unwrap_or(false);
        Self::from_parts(env_flag, pdd_dir)
    }

    /// Build the guard from an explicit environment flag
    pub fn from_parts(env_flag: bool, pdd_dir: &Path) -> Self {
        let marker_path = pdd_dir.join(MARKER_FILE_NAME);
        let installed = env_flag || marker_path.is_file();
        Self {
            env_flag,
            marker_path,
            installed,
        }
    }

    pub fn is_installed(&self) -> bool {
        self.installed
    }

    /// Whether the flag came from the environment rather than the marker
    pub fn is_set_by_environment(&self) -> bool {
        self.env_flag
    }

    pub fn marker_path(&self) -> &Path {
        &self.marker_path
    }

    /// Persist the guard: write the marker file and export the flag
    pub fn mark_installed(&mut self) -> Result<()> {
        let content = format!("pdd {}\n", env!("CARGO_PKG_VERSION"));
        fs::write(&self.marker_path, content)
            .map_err(|e| fs_error::write_failed(&self.marker_path, &e))?;
        // SAFETY: pdd runs the workflow on a single thread.
        unsafe {
            env::set_var(INSTALLED_ENV, "1");
        }
        self.installed = true;
        Ok(())
    }

    /// Remove the marker file
    ///
    /// Returns whether a marker was removed. A flag set through the
    /// environment cannot be cleared from here and keeps the state installed.
    pub fn reset(&mut self) -> Result<bool> {
        let removed = match fs::remove_file(&self.marker_path) {
            Ok(()) => true,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => false,
            Err(e) => return Err(fs_error::write_failed(&self.marker_path, &e)),
        };
        self.installed = self.env_flag;
        Ok(removed)
    }
}
