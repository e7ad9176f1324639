//! Error types and handling for pdd
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! This module is organized into sub-modules by error domain:
//! - [`config`]: Configuration and environment errors
//! - [`install`]: Package manager invocation errors
//! - [`fs`]: Settings file, backup and permission errors

pub mod config;
pub mod fs;
pub mod install;

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for pdd operations
#[derive(Error, Diagnostic, Debug)]
pub enum PddError {
    // Configuration errors
    #[error("Configuration file not found: {path}")]
    #[diagnostic(
        code(pdd::config::not_found),
        help("Create pdd.yaml in the directory given by --path or PDD_PATH")
    )]
    ConfigNotFound { path: String },

    #[error("Failed to read configuration file: {path}")]
    #[diagnostic(code(pdd::config::read_failed))]
    ConfigReadFailed { path: String, reason: String },

    #[error("Failed to parse configuration file: {path}: {reason}")]
    #[diagnostic(code(pdd::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(pdd::config::invalid))]
    ConfigInvalid { message: String },

    #[error("Environment variable {name} is not set")]
    #[diagnostic(code(pdd::config::missing_environment))]
    MissingEnvironment { name: String },

    #[error("Invalid settings module '{module}': {reason}")]
    #[diagnostic(
        code(pdd::config::invalid_settings_module),
        help("Use a dotted module path such as 'app.settings'")
    )]
    InvalidSettingsModule { module: String, reason: String },

    // Package install errors
    #[error("Package command failed: {command} ({status})")]
    #[diagnostic(
        code(pdd::install::command_failed),
        help("The captured output of the package manager is printed above")
    )]
    PackageInstallFailed {
        command: String,
        code: Option<i32>,
        status: String,
        stdout: String,
        stderr: String,
    },

    #[error("Failed to run package command: {command}: {reason}")]
    #[diagnostic(
        code(pdd::install::spawn_failed),
        help("Check that the package manager is installed, or set PDD_PYTHON / PDD_APT")
    )]
    CommandSpawnFailed { command: String, reason: String },

    #[error("Failed to query installed packages with {command}: {reason}")]
    #[diagnostic(code(pdd::install::query_failed))]
    PackageQueryFailed { command: String, reason: String },

    // Settings file errors
    #[error("Settings file not found: {path}")]
    #[diagnostic(
        code(pdd::fs::settings_not_found),
        help("Run pdd from the project directory or pass --project-dir")
    )]
    SettingsFileNotFound { path: String },

    #[error("Failed to read file: {path}: {reason}")]
    #[diagnostic(code(pdd::fs::read_failed))]
    FileReadFailed { path: String, reason: String },

    #[error("Failed to write file: {path}: {reason}")]
    #[diagnostic(code(pdd::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("Failed to back up settings file to {path}: {reason}")]
    #[diagnostic(code(pdd::fs::backup_failed))]
    BackupFailed { path: String, reason: String },

    #[error("No backup found at {path}")]
    #[diagnostic(
        code(pdd::fs::backup_not_found),
        help("A backup is only created by a previous 'pdd install'")
    )]
    BackupNotFound { path: String },

    #[error("Refusing to replace {path}: it was not written by pdd")]
    #[diagnostic(
        code(pdd::fs::hook_exists),
        help("Merge it by hand or pass --force to replace it")
    )]
    HookExists { path: String },

    // Permission errors
    #[error("Permission denied: {path} is not writable")]
    #[diagnostic(
        code(pdd::fs::permission_denied),
        help("Run pdd as a user that can write to the project directory")
    )]
    PermissionDenied { path: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(pdd::fs::io_error))]
    IoError { message: String },
}

impl PddError {
    /// Process exit code for this error.
    ///
    /// Failed package commands propagate the package manager's own exit code;
    /// everything else exits with 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            PddError::PackageInstallFailed {
                code: Some(code), ..
            } if *code != 0 => *code,
            _ => 1,
        }
    }

    /// Captured output of a failed package command, stdout first
    pub fn captured_output(&self) -> Option<String> {
        match self {
            PddError::PackageInstallFailed { stdout, stderr, .. } => {
                let parts: Vec<&str> = [stdout.trim_end(), stderr.trim_end()]
                    .into_iter()
                    .filter(|part| !part.is_empty())
                    .collect();
                if parts.is_empty() {
                    None
                } else {
                    Some(parts.join("\n"))
                }
            }
            _ => None,
        }
    }
}

impl From<std::io::Error> for PddError {
    fn from(err: std::io::Error) -> Self {
        PddError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for PddError {
    fn from(err: serde_yaml::Error) -> Self {
        PddError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, PddError>;

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! test_error_contains {
        ($test_name:ident, $err:expr, $($contains:expr),+ $(,)?) => {
            #[test]
            fn $test_name() {
                let err = $err;
                let error_string = err.to_string();
                $(
                    assert!(error_string.contains($contains),
                        "Error message should contain '{}', got: {}",
                        $contains,
                        error_string
                    );
                )+
            }
        };
    }

    fn failed_command(code: Option<i32>) -> PddError {
        install::command_failed("apt-get install -y vim", code, "", "E: Unable to locate package")
    }

    #[test]
    fn test_error_code() {
        let err = config::not_found("/work/pdd.yaml");
        assert_eq!(
            err.code().map(|c| c.to_string()),
            Some("pdd::config::not_found".to_string())
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: PddError = io_err.into();
        assert!(matches!(err, PddError::IoError { .. }));
    }

    #[test]
    fn test_yaml_error_conversion() {
        let parse_result: std::result::Result<serde_yaml::Value, _> =
            serde_yaml::from_str("invalid: yaml: content: [unclosed");
        let err: PddError = parse_result.unwrap_err().into();
        assert!(matches!(err, PddError::ConfigParseFailed { .. }));
    }

    #[test]
    fn test_exit_code_propagates_package_manager_code() {
        assert_eq!(failed_command(Some(100)).exit_code(), 100);
    }

    #[test]
    fn test_exit_code_without_code_is_one() {
        assert_eq!(failed_command(None).exit_code(), 1);
        assert_eq!(fs::permission_denied("/app").exit_code(), 1);
        assert_eq!(config::invalid("bad").exit_code(), 1);
    }

    #[test]
    fn test_captured_output_skips_empty_streams() {
        let err = failed_command(Some(100));
        assert_eq!(
            err.captured_output(),
            Some("E: Unable to locate package".to_string())
        );
        let quiet = install::command_failed("pip install x", Some(1), " \n", "");
        assert_eq!(quiet.captured_output(), None);
    }

    test_error_contains!(
        test_package_install_failed_message,
        failed_command(Some(100)),
        "apt-get install -y vim",
        "exit code 100"
    );

    test_error_contains!(
        test_missing_environment_message,
        config::missing_environment("DJANGO_SETTINGS_MODULE"),
        "DJANGO_SETTINGS_MODULE"
    );

    test_error_contains!(
        test_permission_denied_message,
        fs::permission_denied("/srv/app"),
        "Permission denied",
        "/srv/app"
    );

    test_error_contains!(
        test_backup_not_found_message,
        fs::backup_not_found("/srv/app/settings.original.py"),
        "No backup found"
    );

    test_error_contains!(
        test_hook_exists_message,
        fs::hook_exists("/usr/lib/python3/site-packages/sitecustomize.py"),
        "Refusing to replace",
        "sitecustomize.py"
    );
}
