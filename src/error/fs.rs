//! Settings file, backup and permission errors

use std::path::Path;

use super::PddError;

/// Creates a settings file not found error
pub fn settings_not_found(path: &Path) -> PddError {
    PddError::SettingsFileNotFound {
        path: path.display().to_string(),
    }
}

/// Creates a file read failed error
pub fn read_failed(path: &Path, err: &std::io::Error) -> PddError {
    PddError::FileReadFailed {
        path: path.display().to_string(),
        reason: err.to_string(),
    }
}

/// Creates a file write failed error
///
/// Permission failures surface as [`PddError::PermissionDenied`].
pub fn write_failed(path: &Path, err: &std::io::Error) -> PddError {
    if err.kind() == std::io::ErrorKind::PermissionDenied {
        return permission_denied(path);
    }
    PddError::FileWriteFailed {
        path: path.display().to_string(),
        reason: err.to_string(),
    }
}

/// Creates a backup failed error
pub fn backup_failed(path: &Path, err: &std::io::Error) -> PddError {
    PddError::BackupFailed {
        path: path.display().to_string(),
        reason: err.to_string(),
    }
}

/// Creates a backup not found error
pub fn backup_not_found(path: impl AsRef<Path>) -> PddError {
    PddError::BackupNotFound {
        path: path.as_ref().display().to_string(),
    }
}

/// Creates an error for a foreign interpreter start-up hook
pub fn hook_exists(path: impl AsRef<Path>) -> PddError {
    PddError::HookExists {
        path: path.as_ref().display().to_string(),
    }
}

/// Creates a permission denied error
pub fn permission_denied(path: impl AsRef<Path>) -> PddError {
    PddError::PermissionDenied {
        path: path.as_ref().display().to_string(),
    }
}
