//! Idempotent package installation
//!
//! This module handles:
//! - Selecting the pip packages that are not yet installed
//! - Installing them in one batched pip invocation
//! - Setting declared environment variables
//! - Refreshing the OS package index and installing OS packages in one batch
//!
//! Order is pip packages, then environment, then OS packages. The first
//! failing command aborts the run.

pub mod backend;
pub mod command;
pub mod pip;

use std::collections::BTreeMap;

use crate::config::PackageSpec;
use crate::error::Result;
use crate::ui::Reporter;

pub use backend::{PackageBackend, SystemBackend};

/// What an install run did (or, in dry-run mode, would do)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallReport {
    /// pip packages already present and skipped
    pub pip_present: Vec<String>,

    /// pip packages handed to the batched pip install
    pub pip_installed: Vec<String>,

    /// Environment variables set
    pub env_set: BTreeMap<String, String>,

    /// OS packages handed to the batched OS install
    pub os_installed: Vec<String>,

    /// Whether commands were skipped because of dry-run mode
    pub dry_run: bool,
}

impl InstallReport {
    /// True when no install command ran and no variable was set
    pub fn is_noop(&self) -> bool {
        self.pip_installed.is_empty() && self.env_set.is_empty() && self.os_installed.is_empty()
    }
}

/// Package installer for a container
pub struct Installer<'a, B: PackageBackend + ?Sized> {
    backend: &'a mut B,
    reporter: Reporter,
    dry_run: bool,
}

impl<'a, B: PackageBackend + ?Sized> Installer<'a, B> {
    /// Create a new installer
    pub fn new(backend: &'a mut B, reporter: Reporter) -> Self {
        Self {
            backend,
            reporter,
            dry_run: false,
        }
    }

    /// Create a new installer with dry-run mode
    pub fn new_with_dry_run(backend: &'a mut B, reporter: Reporter, dry_run: bool) -> Self {
        Self {
            backend,
            reporter,
            dry_run,
        }
    }

    /// Bring the host in line with `spec`
    pub fn ensure_installed(&mut self, spec: &PackageSpec) -> Result<InstallReport> {
        let mut report = InstallReport {
            dry_run: self.dry_run,
            ..InstallReport::default()
        };

        self.install_pip_packages(spec, &mut report)?;
        self.set_environment(spec, &mut report);
        self.install_os_packages(spec, &mut report)?;

        Ok(report)
    }

    fn install_pip_packages(&mut self, spec: &PackageSpec, report: &mut InstallReport) -> Result<()> {
        if spec.pip_packages.is_empty() {
            self.reporter.debug("No pip packages to install");
            return Ok(());
        }

        let installed = self.backend.installed_pip_packages()?;
        let missing = pip::missing_packages(&spec.pip_packages, &installed);
        report.pip_present = spec
            .pip_packages
            .iter()
            .filter(|package| !missing.contains(package))
            .cloned()
            .collect();

        for package in &report.pip_present {
            self.reporter.debug(format!("pip package already installed: {package}"));
        }

        if missing.is_empty() {
            self.reporter.info("All pip packages are already installed");
            return Ok(());
        }

        self.reporter
            .info(format!("Installing pip packages: {}", missing.join(", ")));
        if !self.dry_run {
            self.backend.pip_install(&missing)?;
        }
        report.pip_installed = missing;
        Ok(())
    }

    fn set_environment(&mut self, spec: &PackageSpec, report: &mut InstallReport) {
        for (name, value) in &spec.env_vars {
            self.reporter
                .info(format!("Setting additional environment: {name}={value}"));
            if !self.dry_run {
                self.backend.set_env(name, value);
            }
            report.env_set.insert(name.clone(), value.clone());
        }
    }

    fn install_os_packages(&mut self, spec: &PackageSpec, report: &mut InstallReport) -> Result<()> {
        if spec.os_packages.is_empty() {
            self.reporter.debug("No OS packages to install");
            return Ok(());
        }

        self.reporter.info(format!(
            "Installing OS packages: {}",
            spec.os_packages.join(", ")
        ));
        if !self.dry_run {
            self.backend.os_refresh()?;
            self.backend.os_install(&spec.os_packages)?;
        }
        report.os_installed = spec.os_packages.clone();
        Ok(())
    }
}
