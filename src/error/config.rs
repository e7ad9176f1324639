//! Configuration errors

use super::PddError;

/// Creates a config not found error
pub fn not_found(path: impl Into<String>) -> PddError {
    PddError::ConfigNotFound { path: path.into() }
}

/// Creates a config read failed error
pub fn read_failed(path: impl Into<String>, reason: impl Into<String>) -> PddError {
    PddError::ConfigReadFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates a config parse failed error
pub fn parse_failed(path: impl Into<String>, reason: impl Into<String>) -> PddError {
    PddError::ConfigParseFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates an invalid config error
pub fn invalid(message: impl Into<String>) -> PddError {
    PddError::ConfigInvalid {
        message: message.into(),
    }
}

/// Creates a missing environment variable error
pub fn missing_environment(name: impl Into<String>) -> PddError {
    PddError::MissingEnvironment { name: name.into() }
}

/// Creates an invalid settings module error
pub fn invalid_settings_module(module: impl Into<String>, reason: impl Into<String>) -> PddError {
    PddError::InvalidSettingsModule {
        module: module.into(),
        reason: reason.into(),
    }
}
