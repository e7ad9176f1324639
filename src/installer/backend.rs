//! Package manager backends
//!
//! [`PackageBackend`] is the seam between the installer's decisions and the
//! host: the system backend shells out to pip and apt-get, tests substitute a
//! recording fake.

use std::env;
use std::path::PathBuf;

use super::command::PackageCommand;
use super::pip;
use crate::error::{Result, install};
use crate::ui::Reporter;
use crate::ui::progress::{self, CommandProgress};

/// Environment variable overriding the Python interpreter
pub const PYTHON_ENV: &str = "PDD_PYTHON";

/// Environment variable overriding the apt executable
pub const APT_ENV: &str = "PDD_APT";

const DEFAULT_PYTHON: &str = "python3";
const DEFAULT_APT: &str = "apt-get";

/// Operations the installer needs from the host
pub trait PackageBackend {
    /// Names of the distributions in the interpreter's installed-package metadata
    fn installed_pip_packages(&mut self) -> Result<Vec<String>>;

    /// Install all `packages` in one pip invocation
    fn pip_install(&mut self, packages: &[String]) -> Result<()>;

    /// Set an environment variable for this process and its children
    fn set_env(&mut self, name: &str, value: &str);

    /// Refresh the OS package index
    fn os_refresh(&mut self) -> Result<()>;

    /// Install all `packages` in one OS package manager invocation
    fn os_install(&mut self, packages: &[String]) -> Result<()>;
}

/// Backend running pip and apt-get on the host
pub struct SystemBackend {
    python: String,
    apt: String,
    reporter: Reporter,
    progress: Box<dyn CommandProgress>,
}

impl SystemBackend {
    pub fn new(python: impl Into<String>, apt: impl Into<String>, reporter: Reporter) -> Self {
        Self {
            python: python.into(),
            apt: apt.into(),
            reporter,
            progress: progress::for_terminal(),
        }
    }

    /// Executables from `PDD_PYTHON` / `PDD_APT`, falling back to `python3` / `apt-get`
    pub fn from_env(reporter: Reporter) -> Self {
        let python = env::var(PYTHON_ENV).unwrap_or_else(|_| DEFAULT_PYTHON.to_string());
        let apt = env::var(APT_ENV).unwrap_or_else(|_| DEFAULT_APT.to_string());
        Self::new(python, apt, reporter)
    }

    /// The interpreter's first site-packages directory
    pub fn site_packages(&mut self) -> Result<PathBuf> {
        let command = PackageCommand::new(&self.python)
            .args(["-c", "import site; print(site.getsitepackages()[0])"]);
        let stdout = self.run(&command)?;
        let dir = stdout.trim();
        if dir.is_empty() {
            return Err(install::query_failed(
                command.display(),
                "no site-packages directory reported",
            ));
        }
        Ok(PathBuf::from(dir))
    }

    fn pip(&self) -> PackageCommand {
        PackageCommand::new(&self.python).args(["-m", "pip"])
    }

    fn apt(&self) -> PackageCommand {
        PackageCommand::new(&self.apt).env("DEBIAN_FRONTEND", "noninteractive")
    }

    fn run(&mut self, command: &PackageCommand) -> Result<String> {
        self.reporter.debug(format!("Running: {}", command.display()));
        let output = command.run(self.progress.as_mut())?;
        if !output.stdout.trim().is_empty() {
            self.reporter.debug(output.stdout.trim_end());
        }
        if !output.stderr.trim().is_empty() {
            self.reporter.debug(output.stderr.trim_end());
        }
        Ok(output.stdout)
    }
}

impl PackageBackend for SystemBackend {
    fn installed_pip_packages(&mut self) -> Result<Vec<String>> {
        let command = self.pip().args(["list", "--format=json"]);
        let stdout = self.run(&command)?;
        pip::parse_pip_list(&command.display(), &stdout)
    }

    fn pip_install(&mut self, packages: &[String]) -> Result<()> {
        let command = self.pip().arg("install").args(packages.iter().cloned());
        self.run(&command).map(|_| ())
    }

    fn set_env(&mut self, name: &str, value: &str) {
        // SAFETY: pdd runs the workflow on a single thread.
        unsafe {
            env::set_var(name, value);
        }
    }

    fn os_refresh(&mut self) -> Result<()> {
        let command = self.apt().arg("update");
        self.run(&command).map(|_| ())
    }

    fn os_install(&mut self, packages: &[String]) -> Result<()> {
        let command = self.apt().args(["install", "-y"]).args(packages.iter().cloned());
        self.run(&command).map(|_| ())
    }
}
