//! Blocking package manager invocations with captured output

use std::ffi::OsString;
use std::process::Command;

use crate::error::{Result, install};
use crate::ui::progress::CommandProgress;

/// Captured output of a successful command
#[derive(Debug, Clone, Default)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
}

/// A package manager command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageCommand {
    program: String,
    args: Vec<String>,
    envs: Vec<(String, String)>,
}

impl PackageCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            envs: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Extra environment for the child only
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.envs.push((key.into(), value.into()));
        self
    }

    /// Command line as shown to users and in errors
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Run to completion, capturing stdout and stderr
    ///
    /// A non-zero exit becomes a package install error carrying the
    /// command line and both captured streams.
    pub fn run(&self, progress: &mut dyn CommandProgress) -> Result<CommandOutput> {
        let mut command = Command::new(&self.program);
        command.args(&self.args);
        for (key, value) in &self.envs {
            command.env(OsString::from(key), OsString::from(value));
        }

        progress.start(&self.display());
        let output = command.output();
        progress.finish();

        let output = output.map_err(|e| install::spawn_failed(self.display(), e.to_string()))?;
        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if !output.status.success() {
            return Err(install::command_failed(
                self.display(),
                output.status.code(),
                stdout,
                stderr,
            ));
        }

        Ok(CommandOutput { stdout, stderr })
    }
}
