//! pip package metadata
//!
//! Presence checks compare project names after PEP 503 normalization, so a
//! declared `Django` matches an installed `django` and `typing_extensions`
//! matches `typing-extensions`.

use std::collections::HashSet;

use serde::Deserialize;

use crate::error::{Result, install};

#[derive(Debug, Deserialize)]
struct PipListEntry {
    name: String,
}

/// Parse the output of `pip list --format=json` into distribution names
pub fn parse_pip_list(command: &str, json: &str) -> Result<Vec<String>> {
    let entries: Vec<PipListEntry> =
        serde_json::from_str(json.trim()).map_err(|e| install::query_failed(command, e.to_string()))?;
    Ok(entries.into_iter().map(|entry| entry.name).collect())
}

/// Project name of a requirement, without extras, markers or version specifiers
///
/// `django-debug-toolbar>=4.2` gives `django-debug-toolbar`,
/// `uvicorn[standard]` gives `uvicorn`.
pub fn requirement_name(requirement: &str) -> &str {
    let end = requirement
        .find(|c: char| matches!(c, '<' | '>' | '=' | '!' | '~' | ';' | '[' | '@' | ' '))
        .unwrap_or(requirement.len());
    requirement[..end].trim()
}

/// PEP 503 normalized project name
pub fn normalize_name(name: &str) -> String {
    let mut normalized = String::with_capacity(name.len());
    let mut last_was_separator = false;
    for c in name.chars() {
        if matches!(c, '-' | '_' | '.') {
            if !last_was_separator {
                normalized.push('-');
            }
            last_was_separator = true;
        } else {
            normalized.push(c.to_ascii_lowercase());
            last_was_separator = false;
        }
    }
    normalized
}

/// Declared requirements whose project is not among `installed`, in declaration order
pub fn missing_packages(declared: &[String], installed: &[String]) -> Vec<String> {
    let present: HashSet<String> = installed.iter().map(|name| normalize_name(name)).collect();
    declared
        .iter()
        .filter(|requirement| !present.contains(&normalize_name(requirement_name(requirement))))
        .cloned()
        .collect()
}
