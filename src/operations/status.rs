//! Status operation module
//!
//! Reports the install guard, whether `pdd.yaml` exists and the state of the
//! settings file, without changing anything.

use std::path::PathBuf;

use console::Style;
use serde::Serialize;

use super::ProjectPaths;
use crate::error::{PddError, Result};
use crate::settings::{PythonRenderer, SettingsRenderer};
use crate::state::InstallState;

/// Snapshot of a project's bootstrap state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusReport {
    pub installed: bool,
    pub installed_by_environment: bool,
    pub marker_path: PathBuf,
    pub config_path: PathBuf,
    pub config_present: bool,
    pub settings_module: Option<String>,
    pub settings_path: Option<PathBuf>,
    pub settings_present: bool,
    pub patched: bool,
    pub backup_path: Option<PathBuf>,
    pub backup_present: bool,
}

/// High-level status operation
pub struct StatusOperation<'a> {
    paths: &'a ProjectPaths,
    state: &'a InstallState,
}

impl<'a> StatusOperation<'a> {
    pub fn new(paths: &'a ProjectPaths, state: &'a InstallState) -> Self {
        Self { paths, state }
    }

    /// Collect the report
    ///
    /// A missing settings module is reported, not an error; an invalid one is.
    pub fn collect(&self) -> Result<StatusReport> {
        let config_path = self.paths.config_path();
        let mut report = StatusReport {
            installed: self.state.is_installed(),
            installed_by_environment: self.state.is_set_by_environment(),
            marker_path: self.state.marker_path().to_path_buf(),
            config_present: config_path.is_file(),
            config_path,
            settings_module: self.paths.settings_module.clone(),
            settings_path: None,
            settings_present: false,
            patched: false,
            backup_path: None,
            backup_present: false,
        };

        let settings = match self.paths.settings_file() {
            Ok(settings) => settings,
            Err(PddError::MissingEnvironment { .. }) => return Ok(report),
            Err(e) => return Err(e),
        };

        report.settings_present = settings.exists();
        if report.settings_present {
            report.patched = settings.contains_marker(&PythonRenderer::default().marker())?;
        }
        report.backup_present = settings.has_backup();
        report.settings_path = Some(settings.path().to_path_buf());
        report.backup_path = Some(settings.backup_path().to_path_buf());
        Ok(report)
    }

    /// Execute status operation
    pub fn execute(&self, json: bool) -> Result<()> {
        let report = self.collect()?;
        if json {
            let rendered = serde_json::to_string_pretty(&report).map_err(|e| PddError::IoError {
                message: format!("Failed to serialize status: {e}"),
            })?;
            println!("{rendered}");
        } else {
            display(&report);
        }
        Ok(())
    }
}

fn display(report: &StatusReport) {
    let label = Style::new().bold();
    let yes = Style::new().green();
    let no = Style::new().yellow();
    let flag = |value: bool| {
        if value {
            yes.apply_to("yes")
        } else {
            no.apply_to("no")
        }
    };

    let guard = if report.installed_by_environment {
        " (from environment)"
    } else {
        ""
    };
    println!("{} {}{guard}", label.apply_to("Installed:"), flag(report.installed));
    println!(
        "{} {}",
        label.apply_to("Marker:"),
        report.marker_path.display()
    );
    println!(
        "{} {} [{}]",
        label.apply_to("Config:"),
        report.config_path.display(),
        if report.config_present { "present" } else { "missing" }
    );

    match (&report.settings_module, &report.settings_path) {
        (Some(module), Some(path)) => {
            println!(
                "{} {module} ({})",
                label.apply_to("Settings:"),
                path.display()
            );
            if report.settings_present {
                println!("  {} {}", label.apply_to("Patched:"), flag(report.patched));
            } else {
                println!("  {}", no.apply_to("settings file not found"));
            }
        }
        _ => println!("{} {}", label.apply_to("Settings:"), no.apply_to("not set")),
    }

    if let Some(backup) = &report.backup_path {
        println!(
            "  {} {} [{}]",
            label.apply_to("Backup:"),
            backup.display(),
            if report.backup_present { "present" } else { "none" }
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::MARKER_FILE_NAME;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_status_of_fresh_project() {
        let temp = TempDir::new().unwrap();
        let paths = ProjectPaths::new(temp.path(), temp.path(), None);
        let state = InstallState::from_parts(false, temp.path());

        let report = StatusOperation::new(&paths, &state).collect().unwrap();
        assert!(!report.installed);
        assert!(!report.config_present);
        assert_eq!(report.settings_path, None);
        assert!(!report.backup_present);
    }

    #[test]
    fn test_status_of_patched_project() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("app")).unwrap();
        fs::write(temp.path().join("pdd.yaml"), "pdd: {}\n").unwrap();
        fs::write(
            temp.path().join("app/settings.py"),
            "A = 1\n\n### PDD INJECTION ###\n",
        )
        .unwrap();
        fs::write(temp.path().join("app/settings.original.py"), "A = 1\n").unwrap();
        fs::write(temp.path().join(MARKER_FILE_NAME), "pdd\n").unwrap();
        let paths = ProjectPaths::new(temp.path(), temp.path(), Some("app.settings".to_string()));
        let state = InstallState::from_parts(false, temp.path());

        let report = StatusOperation::new(&paths, &state).collect().unwrap();
        assert!(report.installed);
        assert!(!report.installed_by_environment);
        assert!(report.config_present);
        assert!(report.settings_present);
        assert!(report.patched);
        assert!(report.backup_present);
        assert_eq!(
            report.backup_path,
            Some(temp.path().join("app/settings.original.py"))
        );
    }

    #[test]
    fn test_status_rejects_invalid_module() {
        let temp = TempDir::new().unwrap();
        let paths = ProjectPaths::new(temp.path(), temp.path(), Some("bad..module".to_string()));
        let state = InstallState::from_parts(false, temp.path());
        assert!(matches!(
            StatusOperation::new(&paths, &state).collect().unwrap_err(),
            PddError::InvalidSettingsModule { .. }
        ));
    }

    #[test]
    fn test_status_report_serializes() {
        let temp = TempDir::new().unwrap();
        let paths = ProjectPaths::new(temp.path(), temp.path(), None);
        let state = InstallState::from_parts(true, temp.path());
        let report = StatusOperation::new(&paths, &state).collect().unwrap();

        let json: serde_json::Value = serde_json::to_value(&report).unwrap();
        assert_eq!(json["installed"], serde_json::Value::Bool(true));
        assert_eq!(json["installed_by_environment"], serde_json::Value::Bool(true));
        assert!(json["settings_path"].is_null());
    }
}
