//! Append-only settings patching
//!
//! The patch is textual: a blank line, the injection marker, one line per
//! app, one line per setting. Later assignments shadow earlier ones when the
//! settings module is executed; nothing in the existing file is inspected
//! beyond the marker line.

use std::fs::{self, OpenOptions};
use std::io::Write;

use super::render::{PythonRenderer, SettingsRenderer};
use super::{SettingsFile, has_marker_line};
use crate::config::PackageSpec;
use crate::error::{Result, fs as fs_error};
use crate::ui::Reporter;

/// What a patch run did to the settings file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatchOutcome {
    /// A backup of the original was written by this run
    pub backup_created: bool,

    /// The injection block was appended by this run
    pub appended: bool,

    /// The marker was already present, nothing appended
    pub already_patched: bool,

    /// Lines of the injection block, marker included
    pub lines: Vec<String>,
}

/// Applies a [`PackageSpec`]'s apps and settings to a settings file
pub struct Patcher<R: SettingsRenderer = PythonRenderer> {
    renderer: R,
    reporter: Reporter,
    dry_run: bool,
}

impl Patcher<PythonRenderer> {
    pub fn new(reporter: Reporter) -> Self {
        Self::with_renderer(PythonRenderer::default(), reporter)
    }
}

impl<R: SettingsRenderer> Patcher<R> {
    pub fn with_renderer(renderer: R, reporter: Reporter) -> Self {
        Self {
            renderer,
            reporter,
            dry_run: false,
        }
    }

    /// Report what would be written without touching the file
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Injection block for `spec`, marker first
    pub fn injection_lines(&self, spec: &PackageSpec) -> Vec<String> {
        std::iter::once(self.renderer.marker())
            .chain(spec.extra_apps.iter().map(|app| self.renderer.app_line(app)))
            .chain(
                spec.extra_settings
                    .iter()
                    .map(|(key, value)| self.renderer.setting_line(key, value)),
            )
            .collect()
    }

    /// Back up the original once, then append the injection block once
    pub fn patch(&self, spec: &PackageSpec, file: &SettingsFile) -> Result<PatchOutcome> {
        let content = file.read()?;
        let mut outcome = PatchOutcome {
            lines: self.injection_lines(spec),
            ..PatchOutcome::default()
        };

        if self.dry_run {
            self.reporter.info(format!(
                "Would append {} line(s) to {}",
                outcome.lines.len(),
                file.path().display()
            ));
            return Ok(outcome);
        }

        outcome.backup_created = self.backup(file)?;

        if has_marker_line(&content, &self.renderer.marker()) {
            self.reporter.warn(format!(
                "{} already contains the injection marker, not appending again",
                file.path().display()
            ));
            outcome.already_patched = true;
            return Ok(outcome);
        }

        Self::append(file, &content, &outcome.lines)?;
        self.reporter.info(format!(
            "Injected {} app(s) and {} setting(s) into {}",
            spec.extra_apps.len(),
            spec.extra_settings.len(),
            file.path().display()
        ));
        outcome.appended = true;
        Ok(outcome)
    }

    /// Copy the original to the backup path unless a backup already exists
    fn backup(&self, file: &SettingsFile) -> Result<bool> {
        if file.has_backup() {
            self.reporter.debug(format!(
                "Keeping existing backup {}",
                file.backup_path().display()
            ));
            return Ok(false);
        }
        fs::copy(file.path(), file.backup_path())
            .map_err(|e| fs_error::backup_failed(file.backup_path(), &e))?;
        self.reporter.info(format!(
            "Backed up original settings to {}",
            file.backup_path().display()
        ));
        Ok(true)
    }

    fn append(file: &SettingsFile, content: &[u8], lines: &[String]) -> Result<()> {
        let mut block = String::new();
        if content.last().is_some_and(|byte| *byte != b'\n') {
            block.push('\n');
        }
        block.push('\n');
        for line in lines {
            block.push_str(line);
            block.push('\n');
        }

        let mut handle = OpenOptions::new()
            .append(true)
            .open(file.path())
            .map_err(|e| fs_error::write_failed(file.path(), &e))?;
        handle
            .write_all(block.as_bytes())
            .and_then(|()| handle.flush())
            .map_err(|e| fs_error::write_failed(file.path(), &e))
    }
}

/// Put the backed-up original back in place
///
/// The backup is moved over the settings file, so a later install backs up
/// the restored original again.
pub fn restore(file: &SettingsFile) -> Result<()> {
    if !file.has_backup() {
        return Err(fs_error::backup_not_found(file.backup_path()));
    }
    fs::rename(file.backup_path(), file.path())
        .map_err(|e| fs_error::write_failed(file.path(), &e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SettingValue;
    use crate::error::PddError;
    use tempfile::TempDir;

    const ORIGINAL: &str = "INSTALLED_APPS = [\"django.contrib.admin\"]\nDEBUG = False\n";

    fn settings_file(temp: &TempDir, content: &str) -> SettingsFile {
        let dir = temp.path().join("app");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("settings.py");
        fs::write(&path, content).unwrap();
        SettingsFile::new(path)
    }

    fn spec() -> PackageSpec {
        PackageSpec {
            extra_apps: vec!["foo.bar".to_string()],
            extra_settings: vec![(
                "DEBUG".to_string(),
                SettingValue::Expression("True".to_string()),
            )],
            ..PackageSpec::default()
        }
    }

    fn marker_count(content: &str) -> usize {
        content
            .lines()
            .filter(|line| *line == "### PDD INJECTION ###")
            .count()
    }

    #[test]
    fn test_patch_appends_block_after_original() {
        let temp = TempDir::new().unwrap();
        let file = settings_file(&temp, ORIGINAL);

        let outcome = Patcher::new(Reporter::default()).patch(&spec(), &file).unwrap();
        assert!(outcome.appended);
        assert!(outcome.backup_created);

        let patched = fs::read_to_string(file.path()).unwrap();
        assert!(patched.starts_with(ORIGINAL));
        assert_eq!(
            &patched[ORIGINAL.len()..],
            "\n### PDD INJECTION ###\nINSTALLED_APPS += [\"foo.bar\"] if \"foo.bar\" not in INSTALLED_APPS else []\nDEBUG = True\n"
        );
    }

    #[test]
    fn test_backup_is_byte_identical() {
        let temp = TempDir::new().unwrap();
        let file = settings_file(&temp, ORIGINAL);

        Patcher::new(Reporter::default()).patch(&spec(), &file).unwrap();
        assert_eq!(fs::read(file.backup_path()).unwrap(), ORIGINAL.as_bytes());
    }

    #[test]
    fn test_second_patch_is_noop() {
        let temp = TempDir::new().unwrap();
        let file = settings_file(&temp, ORIGINAL);
        let patcher = Patcher::new(Reporter::default());

        patcher.patch(&spec(), &file).unwrap();
        let first = fs::read_to_string(file.path()).unwrap();
        let outcome = patcher.patch(&spec(), &file).unwrap();

        assert!(outcome.already_patched);
        assert!(!outcome.appended);
        assert!(!outcome.backup_created);
        let second = fs::read_to_string(file.path()).unwrap();
        assert_eq!(first, second);
        assert_eq!(marker_count(&second), 1);
    }

    #[test]
    fn test_existing_backup_is_preserved() {
        let temp = TempDir::new().unwrap();
        let file = settings_file(&temp, ORIGINAL);
        fs::write(file.backup_path(), "FIRST_EVER = 1\n").unwrap();

        let outcome = Patcher::new(Reporter::default()).patch(&spec(), &file).unwrap();
        assert!(!outcome.backup_created);
        assert!(outcome.appended);
        assert_eq!(
            fs::read_to_string(file.backup_path()).unwrap(),
            "FIRST_EVER = 1\n"
        );
    }

    #[test]
    fn test_missing_trailing_newline_is_completed() {
        let temp = TempDir::new().unwrap();
        let file = settings_file(&temp, "DEBUG = False");

        Patcher::new(Reporter::default()).patch(&spec(), &file).unwrap();
        let patched = fs::read_to_string(file.path()).unwrap();
        assert!(patched.starts_with("DEBUG = False\n\n### PDD INJECTION ###\n"));
    }

    #[test]
    fn test_non_utf8_settings_are_patched_bytewise() {
        let temp = TempDir::new().unwrap();
        let file = settings_file(&temp, "");
        let original: &[u8] = b"# -*- coding: latin-1 -*-\nNAME = 'caf\xe9'";
        fs::write(file.path(), original).unwrap();

        let outcome = Patcher::new(Reporter::default()).patch(&spec(), &file).unwrap();
        assert!(outcome.appended);
        assert_eq!(fs::read(file.backup_path()).unwrap(), original);

        let patched = fs::read(file.path()).unwrap();
        assert!(patched.starts_with(original));
        assert_eq!(
            &patched[original.len()..],
            b"\n\n### PDD INJECTION ###\nINSTALLED_APPS += [\"foo.bar\"] if \"foo.bar\" not in INSTALLED_APPS else []\nDEBUG = True\n"
        );
        assert!(file.contains_marker("### PDD INJECTION ###").unwrap());

        let again = Patcher::new(Reporter::default()).patch(&spec(), &file).unwrap();
        assert!(again.already_patched);
    }

    #[test]
    fn test_empty_spec_still_writes_marker_and_backup() {
        let temp = TempDir::new().unwrap();
        let file = settings_file(&temp, ORIGINAL);

        let outcome = Patcher::new(Reporter::default())
            .patch(&PackageSpec::default(), &file)
            .unwrap();
        assert_eq!(outcome.lines, vec!["### PDD INJECTION ###".to_string()]);
        assert!(file.has_backup());
        assert_eq!(
            fs::read_to_string(file.path()).unwrap(),
            format!("{ORIGINAL}\n### PDD INJECTION ###\n")
        );
    }

    #[test]
    fn test_dry_run_leaves_file_untouched() {
        let temp = TempDir::new().unwrap();
        let file = settings_file(&temp, ORIGINAL);

        let outcome = Patcher::new(Reporter::default())
            .dry_run(true)
            .patch(&spec(), &file)
            .unwrap();
        assert_eq!(outcome.lines.len(), 3);
        assert!(!outcome.appended);
        assert!(!file.has_backup());
        assert_eq!(fs::read_to_string(file.path()).unwrap(), ORIGINAL);
    }

    #[test]
    fn test_missing_settings_file() {
        let temp = TempDir::new().unwrap();
        let file = SettingsFile::new(temp.path().join("app/settings.py"));
        let err = Patcher::new(Reporter::default())
            .patch(&spec(), &file)
            .unwrap_err();
        assert!(matches!(err, PddError::SettingsFileNotFound { .. }));
    }

    #[test]
    fn test_restore_brings_back_original() {
        let temp = TempDir::new().unwrap();
        let file = settings_file(&temp, ORIGINAL);
        Patcher::new(Reporter::default()).patch(&spec(), &file).unwrap();

        restore(&file).unwrap();
        assert_eq!(fs::read_to_string(file.path()).unwrap(), ORIGINAL);
        assert!(!file.has_backup());
    }

    #[test]
    fn test_restore_without_backup() {
        let temp = TempDir::new().unwrap();
        let file = settings_file(&temp, ORIGINAL);
        let err = restore(&file).unwrap_err();
        assert!(matches!(err, PddError::BackupNotFound { .. }));
    }
}
