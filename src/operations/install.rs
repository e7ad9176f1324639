//! Install operation module
//!
//! This module provides InstallOperation struct that wraps the guarded
//! bootstrap workflow: guard check, writability check, spec load, package
//! install, settings patch, guard persist. Any error aborts the run and
//! leaves the guard unset.

use std::io::ErrorKind;
use std::path::Path;

use tempfile::NamedTempFile;

use super::ProjectPaths;
use crate::cli::InstallArgs;
use crate::config::PackageSpec;
use crate::error::{Result, fs as fs_error};
use crate::installer::{InstallReport, Installer, PackageBackend};
use crate::settings::{PatchOutcome, Patcher, SettingsFile};
use crate::state::InstallState;
use crate::ui::Reporter;

/// Configuration options for installation
#[derive(Debug, Clone, Default)]
pub struct InstallOptions {
    pub dry_run: bool,
}

impl From<&InstallArgs> for InstallOptions {
    fn from(args: &InstallArgs) -> Self {
        Self {
            dry_run: args.dry_run,
        }
    }
}

/// Result of an install run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    /// The guard was already set; nothing was touched
    AlreadyInstalled,

    /// The workflow ran to the end (or was simulated in dry-run mode)
    Completed {
        install: InstallReport,
        patch: PatchOutcome,
    },
}

/// High-level install operation
pub struct InstallOperation<'a, B: PackageBackend + ?Sized> {
    paths: &'a ProjectPaths,
    state: &'a mut InstallState,
    backend: &'a mut B,
    reporter: Reporter,
}

impl<'a, B: PackageBackend + ?Sized> InstallOperation<'a, B> {
    pub fn new(
        paths: &'a ProjectPaths,
        state: &'a mut InstallState,
        backend: &'a mut B,
        reporter: Reporter,
    ) -> Self {
        Self {
            paths,
            state,
            backend,
            reporter,
        }
    }

    /// Execute install operation
    pub fn execute(&mut self, options: &InstallOptions) -> Result<InstallOutcome> {
        if self.state.is_installed() {
            self.reporter.warn(format!(
                "Already installed ({}), skipping. Run 'pdd reset' to install again",
                self.guard_source()
            ));
            return Ok(InstallOutcome::AlreadyInstalled);
        }

        let settings = self.paths.settings_file()?;
        ensure_writable(&settings)?;
        ensure_marker_writable(self.paths.pdd_dir())?;

        let config_path = self.paths.config_path();
        let spec = PackageSpec::load(&config_path)?;
        self.reporter
            .debug(format!("Loaded package spec from {}", config_path.display()));
        if spec.is_empty() {
            self.reporter
                .info("Package spec is empty, only the injection marker will be written");
        }

        let install =
            Installer::new_with_dry_run(&mut *self.backend, self.reporter, options.dry_run)
                .ensure_installed(&spec)?;
        if install.is_noop() {
            self.reporter.debug("No packages or environment changes needed");
        }
        let patch = Patcher::new(self.reporter)
            .dry_run(options.dry_run)
            .patch(&spec, &settings)?;

        if options.dry_run {
            self.reporter.info("Dry run complete, nothing was changed");
        } else {
            self.state.mark_installed()?;
            self.reporter.debug(format!(
                "Wrote install marker {}",
                self.state.marker_path().display()
            ));
            self.reporter.info("Installation complete");
        }

        Ok(InstallOutcome::Completed { install, patch })
    }

    fn guard_source(&self) -> String {
        if self.state.is_set_by_environment() {
            format!("{} is set", crate::state::INSTALLED_ENV)
        } else {
            format!("marker {} exists", self.state.marker_path().display())
        }
    }
}

/// Fail early when the settings file is missing or its directory is read-only
fn ensure_writable(settings: &SettingsFile) -> Result<()> {
    let dir: &Path = settings.directory();
    match NamedTempFile::new_in(dir) {
        Ok(_scratch) => {}
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(fs_error::settings_not_found(settings.path()));
        }
        Err(e) => return Err(fs_error::write_failed(dir, &e)),
    }
    if !settings.exists() {
        return Err(fs_error::settings_not_found(settings.path()));
    }
    Ok(())
}

/// Fail early when the install marker could not be written after the run
///
/// A missing pdd directory is left to the config loader to report.
fn ensure_marker_writable(pdd_dir: &Path) -> Result<()> {
    if !pdd_dir.is_dir() {
        return Ok(());
    }
    NamedTempFile::new_in(pdd_dir)
        .map(drop)
        .map_err(|e| fs_error::write_failed(pdd_dir, &e))
}
