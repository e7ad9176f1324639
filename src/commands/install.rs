//! Install command implementation
//!
//! The installation process:
//! 1. Check the install guard and stop if it is set
//! 2. Check that the settings and pdd directories are writable
//! 3. Load pdd.yaml
//! 4. Install missing pip packages, set environment, install OS packages
//! 5. Back up and patch the settings module
//! 6. Persist the install guard

use std::path::PathBuf;

use crate::cli::InstallArgs;
use crate::commands::helpers;
use crate::error::Result;
use crate::installer::SystemBackend;
use crate::operations::{InstallOperation, InstallOptions, InstallOutcome};
use crate::state::InstallState;
use crate::ui::Reporter;

/// Run install command
pub fn run(pdd_path: Option<PathBuf>, args: InstallArgs, reporter: Reporter) -> Result<()> {
    let options = InstallOptions::from(&args);
    let paths = helpers::project_paths(pdd_path, args.project)?;
    let mut state = InstallState::load(paths.pdd_dir());
    let mut backend = SystemBackend::from_env(reporter);

    if options.dry_run {
        reporter.info("Dry run: no packages, files or environment will be changed");
    }

    let outcome =
        InstallOperation::new(&paths, &mut state, &mut backend, reporter).execute(&options)?;
    if let InstallOutcome::Completed { install, patch } = outcome {
        let settings = if patch.appended {
            "patched"
        } else if patch.already_patched {
            "already patched"
        } else {
            "unchanged"
        };
        reporter.debug(format!(
            "Summary: {} pip package(s) installed, {} already present, {} OS package(s), {} variable(s), settings {settings}",
            install.pip_installed.len(),
            install.pip_present.len(),
            install.os_installed.len(),
            install.env_set.len(),
        ));
    }
    Ok(())
}
