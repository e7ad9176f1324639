//! Declarative package spec (pdd.yaml)
//!
//! ```yaml
//! pdd:
//!   pip_packages: [django-debug-toolbar, ipython]
//!   debian_packages: [vim]
//!   additional_environment:
//!     PYTHONBREAKPOINT: ipdb.set_trace
//!   django_apps: [debug_toolbar]
//!   django_settings:
//!     DEBUG: "True"
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde_yaml::Value as YamlValue;

use super::serialization::{
    RawDocument, RawMapping, RawSection, list_literal, mapping_literal, scalar_text,
};
use super::value::SettingValue;
use crate::error::{Result, config};

/// File name of the package spec inside the pdd directory
pub const CONFIG_FILE_NAME: &str = "pdd.yaml";

/// Packages, environment and settings overrides to apply to a container
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PackageSpec {
    /// pip packages, deduplicated, in declaration order
    pub pip_packages: Vec<String>,

    /// OS (Debian) packages, deduplicated, in declaration order
    pub os_packages: Vec<String>,

    /// Environment variables to set in the current process
    pub env_vars: BTreeMap<String, String>,

    /// Framework apps appended to the settings app list, deduplicated
    pub extra_apps: Vec<String>,

    /// Settings overrides; keys upper-cased, later duplicates win
    pub extra_settings: Vec<(String, SettingValue)>,
}

impl PackageSpec {
    /// Path of the package spec inside `pdd_dir`
    pub fn path_in(pdd_dir: &Path) -> PathBuf {
        pdd_dir.join(CONFIG_FILE_NAME)
    }

    /// Load and validate the package spec from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                config::not_found(path.display().to_string())
            } else {
                config::read_failed(path.display().to_string(), e.to_string())
            }
        })?;
        Self::from_yaml(&content, &path.display().to_string())
    }

    /// Parse and validate the package spec from YAML text
    ///
    /// `origin` names the source in parse errors.
    pub fn from_yaml(yaml: &str, origin: &str) -> Result<Self> {
        let document: RawDocument = serde_yaml::from_str(yaml)
            .map_err(|e| config::parse_failed(origin, e.to_string()))?;
        let section = document
            .pdd
            .ok_or_else(|| config::invalid(format!("{origin}: missing section 'pdd'")))?;
        Self::from_section(section)
    }

    fn from_section(section: RawSection) -> Result<Self> {
        let pip_packages = required(section.pip_packages, "pip_packages")?;
        let os_packages = required(section.debian_packages, "debian_packages")?;
        let extra_apps = required(section.django_apps, "django_apps")?;

        Ok(Self {
            pip_packages: dedup(names(&pip_packages, "pip_packages")?),
            os_packages: dedup(names(&os_packages, "debian_packages")?),
            env_vars: environment(section.additional_environment.as_ref())?,
            extra_apps: dedup(names(&extra_apps, "django_apps")?),
            extra_settings: settings(section.django_settings.as_ref())?,
        })
    }

    /// True when there is nothing to install, set or inject
    pub fn is_empty(&self) -> bool {
        self.pip_packages.is_empty()
            && self.os_packages.is_empty()
            && self.env_vars.is_empty()
            && self.extra_apps.is_empty()
            && self.extra_settings.is_empty()
    }
}

fn required(value: Option<YamlValue>, key: &str) -> Result<YamlValue> {
    value.ok_or_else(|| config::invalid(format!("missing key 'pdd.{key}'")))
}

fn names(value: &YamlValue, key: &str) -> Result<Vec<String>> {
    list_literal(key, value)?
        .iter()
        .map(|item| match item {
            YamlValue::String(name) if !name.trim().is_empty() => Ok(name.trim().to_string()),
            _ => Err(config::invalid(format!(
                "pdd.{key} entries must be non-empty strings"
            ))),
        })
        .collect()
}

fn dedup(names: Vec<String>) -> Vec<String> {
    let mut unique: Vec<String> = Vec::with_capacity(names.len());
    for name in names {
        if !unique.contains(&name) {
            unique.push(name);
        }
    }
    unique
}

/// Later declarations of a variable replace earlier ones
fn environment(value: Option<&RawMapping>) -> Result<BTreeMap<String, String>> {
    let Some(value) = value else {
        return Ok(BTreeMap::new());
    };
    let mut env_vars = BTreeMap::new();
    for (name, val) in mapping_literal("additional_environment", value)? {
        let name = scalar_text("environment variable name", &name)?;
        if name.is_empty() || name.contains('=') || name.contains('\0') {
            return Err(config::invalid(format!(
                "invalid environment variable name '{name}'"
            )));
        }
        let val = scalar_text(&format!("environment variable {name}"), &val)?;
        if val.contains('\0') {
            return Err(config::invalid(format!(
                "environment variable {name} contains a NUL byte"
            )));
        }
        env_vars.insert(name, val);
    }
    Ok(env_vars)
}

fn settings(value: Option<&RawMapping>) -> Result<Vec<(String, SettingValue)>> {
    let Some(value) = value else {
        return Ok(Vec::new());
    };
    let mut settings: Vec<(String, SettingValue)> = Vec::new();
    for (key, val) in mapping_literal("django_settings", value)? {
        let key = scalar_text("setting name", &key)?;
        if !is_identifier(&key) {
            return Err(config::invalid(format!(
                "setting name '{key}' is not a valid identifier"
            )));
        }
        let key = key.to_ascii_uppercase();
        let val = SettingValue::from_yaml(&key, &val)?;
        match settings.iter_mut().find(|(existing, _)| *existing == key) {
            Some(slot) => slot.1 = val,
            None => settings.push((key, val)),
        }
    }
    Ok(settings)
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}
