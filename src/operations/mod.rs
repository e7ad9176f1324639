//! Operations module for bootstrapping a development container
//!
//! This module provides high-level operations that coordinate:
//! - InstallOperation: Guarded install and settings injection workflow
//! - RestoreOperation: Operator rollback to the backed-up settings
//! - StatusOperation: Report of guard, config and settings state
//! - HookOperation: Interpreter start-up hook running the install
//!
//! The operations coordinate with:
//! - Config: Package spec loading (from config module)
//! - Installer: pip and OS package installation (from installer module)
//! - Settings: Backup and injection (from settings module)
//! - State: Install guard (from state module)
//! - UI: Console reporting (from ui module)

pub mod hook;
pub mod install;
pub mod restore;
pub mod status;

use std::path::{Path, PathBuf};

use crate::config::PackageSpec;
use crate::error::{Result, config};
use crate::settings::{SETTINGS_MODULE_ENV, SettingsFile};

pub use hook::{HookOperation, HookOptions};
pub use install::{InstallOperation, InstallOptions, InstallOutcome};
pub use restore::RestoreOperation;
pub use status::StatusOperation;

/// Locations an operation works on
#[derive(Debug, Clone)]
pub struct ProjectPaths {
    /// Directory holding `pdd.yaml` and the guard marker
    pub pdd_dir: PathBuf,

    /// Root that dotted settings modules are resolved against
    pub project_dir: PathBuf,

    /// Dotted settings module, e.g. `app.settings`
    pub settings_module: Option<String>,
}

impl ProjectPaths {
    pub fn new(
        pdd_dir: impl Into<PathBuf>,
        project_dir: impl Into<PathBuf>,
        settings_module: Option<String>,
    ) -> Self {
        Self {
            pdd_dir: pdd_dir.into(),
            project_dir: project_dir.into(),
            settings_module,
        }
    }

    pub fn config_path(&self) -> PathBuf {
        PackageSpec::path_in(&self.pdd_dir)
    }

    pub fn pdd_dir(&self) -> &Path {
        &self.pdd_dir
    }

    /// Resolve the settings file, failing when no module was given
    pub fn settings_file(&self) -> Result<SettingsFile> {
        let module = self
            .settings_module
            .as_deref()
            .filter(|module| !module.trim().is_empty())
            .ok_or_else(|| config::missing_environment(SETTINGS_MODULE_ENV))?;
        SettingsFile::from_module(&self.project_dir, module)
    }
}
