//! Package manager invocation errors

use super::PddError;

/// Creates a failed package command error from its exit code and captured output
pub fn command_failed(
    command: impl Into<String>,
    code: Option<i32>,
    stdout: impl Into<String>,
    stderr: impl Into<String>,
) -> PddError {
    let status = match code {
        Some(code) => format!("exit code {code}"),
        None => "terminated by signal".to_string(),
    };
    PddError::PackageInstallFailed {
        command: command.into(),
        code,
        status,
        stdout: stdout.into(),
        stderr: stderr.into(),
    }
}

/// Creates a spawn failure error
pub fn spawn_failed(command: impl Into<String>, reason: impl Into<String>) -> PddError {
    PddError::CommandSpawnFailed {
        command: command.into(),
        reason: reason.into(),
    }
}

/// Creates a package query failure error
pub fn query_failed(command: impl Into<String>, reason: impl Into<String>) -> PddError {
    PddError::PackageQueryFailed {
        command: command.into(),
        reason: reason.into(),
    }
}
