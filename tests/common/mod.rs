//! Common test utilities for pdd integration tests

use assert_cmd::Command;
use std::path::PathBuf;
use tempfile::TempDir;

/// Settings module content every project starts with
#[allow(dead_code)]
pub const ORIGINAL_SETTINGS: &str = "SECRET_KEY = \"test\"\n\
INSTALLED_APPS = [\n    \"django.contrib.admin\",\n]\n\
DEBUG = False\n";

/// Settings path relative to the project root
#[allow(dead_code)]
pub const SETTINGS_PATH: &str = "app/settings.py";

/// Backup path relative to the project root
#[allow(dead_code)]
pub const BACKUP_PATH: &str = "app/settings.original.py";

/// Guard marker path relative to the pdd directory
#[allow(dead_code)]
pub const MARKER_PATH: &str = ".pdd-installed";

/// A project directory doubling as the pdd directory, with stub package managers
pub struct TestWorkspace {
    /// Temporary directory
    #[allow(dead_code)]
    pub temp: TempDir,
    /// Path to project root (also PDD_PATH)
    pub path: PathBuf,
}

impl TestWorkspace {
    /// Create a new test workspace with `app/settings.py` and stub package managers
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        let workspace = Self { temp, path };
        workspace.write_file(SETTINGS_PATH, ORIGINAL_SETTINGS);
        workspace.write_file("app/__init__.py", "");
        workspace.write_file("stubs/pip-list.json", "[]");
        #[cfg(unix)]
        workspace.write_stubs();
        workspace
    }

    /// Write pdd.yaml
    #[allow(dead_code)]
    pub fn write_spec(&self, yaml: &str) {
        self.write_file("pdd.yaml", yaml);
    }

    /// Report `packages` as installed by the pip stub
    #[allow(dead_code)]
    pub fn set_pip_installed(&self, packages: &[&str]) {
        let entries: Vec<String> = packages
            .iter()
            .map(|name| format!("{{\"name\": \"{name}\", \"version\": \"1.0\"}}"))
            .collect();
        self.write_file("stubs/pip-list.json", &format!("[{}]", entries.join(", ")));
    }

    /// Make `apt-get install` exit with `code`
    #[allow(dead_code)]
    pub fn fail_apt_install(&self, code: i32) {
        self.write_file("stubs/apt-exit", &code.to_string());
    }

    /// Commands the stubs were invoked with, one per line
    #[allow(dead_code)]
    pub fn stub_calls(&self) -> Vec<String> {
        let log = self.path.join("stubs/calls.log");
        if !log.exists() {
            return Vec::new();
        }
        std::fs::read_to_string(log)
            .expect("Failed to read stub log")
            .lines()
            .map(ToString::to_string)
            .collect()
    }

    /// Environment `apt-get install` ran with, one `NAME=value` per line
    #[allow(dead_code)]
    pub fn apt_install_environment(&self) -> Vec<String> {
        self.read_file("stubs/apt-env")
            .lines()
            .map(ToString::to_string)
            .collect()
    }

    /// pdd command running in this workspace with a clean environment
    pub fn pdd(&self) -> Command {
        let mut cmd = Command::cargo_bin("pdd").expect("pdd binary not built");
        cmd.current_dir(&self.path);
        // Always ignore any developer PDD_* overrides during tests
        cmd.env_remove("PDD_IS_INSTALLED");
        cmd.env_remove("PDD_DEBUG");
        cmd.env("PDD_PATH", &self.path);
        cmd.env("DJANGO_SETTINGS_MODULE", "app.settings");
        cmd.env("PDD_PYTHON", self.path.join("stubs/python3"));
        cmd.env("PDD_APT", self.path.join("stubs/apt-get"));
        cmd
    }

    /// Write a file in workspace
    pub fn write_file(&self, path: &str, content: &str) {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
    }

    /// Read a file from workspace
    #[allow(dead_code)]
    pub fn read_file(&self, path: &str) -> String {
        let file_path = self.path.join(path);
        std::fs::read_to_string(&file_path).expect("Failed to read file")
    }

    /// Check if a file exists in workspace
    #[allow(dead_code)]
    pub fn file_exists(&self, path: &str) -> bool {
        self.path.join(path).exists()
    }

    #[cfg(unix)]
    fn write_stubs(&self) {
        let stubs = self.path.join("stubs");
        let dir = stubs.display();

        self.write_executable(
            "stubs/python3",
            &format!(
                "#!/bin/sh\n\
                 echo \"python3 $*\" >> \"{dir}/calls.log\"\n\
                 if [ \"$1\" = \"-c\" ]; then\n  echo \"{dir}/site\"\n  exit 0\nfi\n\
                 if [ \"$3\" = \"list\" ]; then\n  cat \"{dir}/pip-list.json\"\n  exit 0\nfi\n\
                 echo \"Successfully installed\"\n\
                 exit 0\n"
            ),
        );
        self.write_executable(
            "stubs/apt-get",
            &format!(
                "#!/bin/sh\n\
                 echo \"apt-get $*\" >> \"{dir}/calls.log\"\n\
                 if [ \"$1\" = \"install\" ]; then env > \"{dir}/apt-env\"; fi\n\
                 code=0\n\
                 if [ \"$1\" = \"install\" ] && [ -f \"{dir}/apt-exit\" ]; then code=$(cat \"{dir}/apt-exit\"); fi\n\
                 if [ \"$code\" -ne 0 ]; then echo \"E: Unable to locate package\" >&2; fi\n\
                 exit $code\n"
            ),
        );
    }

    #[cfg(unix)]
    fn write_executable(&self, path: &str, content: &str) {
        use std::os::unix::fs::PermissionsExt;

        self.write_file(path, content);
        std::fs::set_permissions(self.path.join(path), std::fs::Permissions::from_mode(0o755))
            .expect("Failed to make stub executable");
    }
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workspace_creation() {
        let workspace = TestWorkspace::new();
        assert!(workspace.path.exists());
        assert_eq!(workspace.read_file(SETTINGS_PATH), ORIGINAL_SETTINGS);
    }

    #[test]
    fn test_workspace_file_operations() {
        let workspace = TestWorkspace::new();
        workspace.write_file("test/file.txt", "hello");
        assert!(workspace.file_exists("test/file.txt"));
        assert_eq!(workspace.read_file("test/file.txt"), "hello");
    }

    #[test]
    fn test_stub_log_starts_empty() {
        let workspace = TestWorkspace::new();
        assert!(workspace.stub_calls().is_empty());
    }
}
