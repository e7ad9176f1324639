//! Target settings file handling
//!
//! This module handles:
//! - Resolving the settings file from a dotted module reference
//! - Deriving the sibling backup path (`settings.py` to `settings.original.py`)
//! - Appending the injection block once ([`patcher`])
//! - Formatting injected lines ([`render`])

pub mod patcher;
pub mod render;

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, config, fs as fs_error};

pub use patcher::{PatchOutcome, Patcher};
pub use render::{PythonRenderer, SettingsRenderer};

/// Environment variable naming the settings module
pub const SETTINGS_MODULE_ENV: &str = "DJANGO_SETTINGS_MODULE";

const MODULE_EXTENSION: &str = "py";

/// A settings file and its backup location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsFile {
    path: PathBuf,
    backup_path: PathBuf,
}

impl SettingsFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let backup_path = backup_path_for(&path);
        Self { path, backup_path }
    }

    /// Resolve `app.settings` to `<project_dir>/app/settings.py`
    pub fn from_module(project_dir: &Path, module: &str) -> Result<Self> {
        let module = module.trim();
        if module.is_empty() {
            return Err(config::invalid_settings_module(module, "module path is empty"));
        }

        let mut path = project_dir.to_path_buf();
        let parts: Vec<&str> = module.split('.').collect();
        for part in &parts {
            if !is_module_component(part) {
                return Err(config::invalid_settings_module(
                    module,
                    format!("'{part}' is not a valid module name"),
                ));
            }
        }
        let (file, packages) = parts
            .split_last()
            .ok_or_else(|| config::invalid_settings_module(module, "module path is empty"))?;
        for package in packages {
            path.push(package);
        }
        path.push(format!("{file}.{MODULE_EXTENSION}"));
        Ok(Self::new(path))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn backup_path(&self) -> &Path {
        &self.backup_path
    }

    /// Directory holding the settings file
    pub fn directory(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    pub fn has_backup(&self) -> bool {
        self.backup_path.is_file()
    }

    /// Read the settings file as raw bytes
    ///
    /// The file is never decoded, so any source encoding is accepted.
    pub fn read(&self) -> Result<Vec<u8>> {
        fs::read(&self.path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                fs_error::settings_not_found(&self.path)
            } else {
                fs_error::read_failed(&self.path, &e)
            }
        })
    }

    /// Whether the file already contains the given marker line
    pub fn contains_marker(&self, marker: &str) -> Result<bool> {
        Ok(has_marker_line(&self.read()?, marker))
    }
}

/// Whether any line of `content` is exactly `marker`, ignoring surrounding whitespace
pub fn has_marker_line(content: &[u8], marker: &str) -> bool {
    content
        .split(|byte| *byte == b'\n')
        .any(|line| line.trim_ascii() == marker.as_bytes())
}

fn is_module_component(part: &str) -> bool {
    let mut chars = part.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => {
            chars.all(|c| c.is_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

/// `foo.py` to `foo.original.py`; `foo` to `foo.original`
fn backup_path_for(path: &Path) -> PathBuf {
    let mut name = OsString::new();
    if let Some(stem) = path.file_stem() {
        name.push(stem);
    }
    name.push(".original");
    if let Some(extension) = path.extension() {
        name.push(".");
        name.push(extension);
    }
    path.with_file_name(name)
}
