//! Command helper utilities

use std::path::PathBuf;

use crate::cli::ProjectArgs;
use crate::error::{PddError, Result};
use crate::operations::ProjectPaths;

/// Resolve a directory from an optional argument
///
/// If a path is provided, use it. Otherwise, resolve to the current directory.
pub fn resolve_dir(path: Option<PathBuf>) -> Result<PathBuf> {
    match path {
        Some(path) => Ok(path),
        None => std::env::current_dir().map_err(|e| PddError::IoError {
            message: format!("Failed to get current directory: {e}"),
        }),
    }
}

/// Combine the global pdd directory with per-command project arguments
pub fn project_paths(pdd_path: Option<PathBuf>, project: ProjectArgs) -> Result<ProjectPaths> {
    Ok(ProjectPaths::new(
        resolve_dir(pdd_path)?,
        resolve_dir(project.project_dir)?,
        project.settings_module,
    ))
}
