//! Interpreter start-up hook
//!
//! Writes a `sitecustomize.py` into the interpreter's package directory so
//! `pdd install` runs whenever Python starts in the container. The hook skips
//! itself once the guard is set, when no settings module is configured, and
//! inside the interpreters pdd spawns for pip.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, fs as fs_error};
use crate::settings::render::quote;
use crate::state::{INSTALLED_ENV, MARKER_FILE_NAME};
use crate::ui::Reporter;

/// File name Python imports at start-up
pub const HOOK_FILE_NAME: &str = "sitecustomize.py";

/// Set while the hook runs pdd, so nested interpreters do not recurse
pub const HOOK_ACTIVE_ENV: &str = "PDD_HOOK_ACTIVE";

const HOOK_HEADER: &str = "# Generated by pdd";

/// Configuration options for writing the hook
#[derive(Debug, Clone, Default)]
pub struct HookOptions {
    /// Replace a `sitecustomize.py` that pdd did not write
    pub force: bool,
}

/// High-level hook operation
pub struct HookOperation<'a> {
    pdd_dir: &'a Path,
    pdd_exe: &'a Path,
    reporter: Reporter,
}

impl<'a> HookOperation<'a> {
    pub fn new(pdd_dir: &'a Path, pdd_exe: &'a Path, reporter: Reporter) -> Self {
        Self {
            pdd_dir,
            pdd_exe,
            reporter,
        }
    }

    /// Source of the hook module
    pub fn render(&self) -> String {
        let exe = quote(&self.pdd_exe.display().to_string());
        let pdd_dir = quote(&self.pdd_dir.display().to_string());
        let marker = quote(&self.pdd_dir.join(MARKER_FILE_NAME).display().to_string());
        format!(
            "{HOOK_HEADER} {version}; runs the container bootstrap at interpreter start.\n\
             # Delete this file to disable it.\n\
             import os\n\
             import subprocess\n\
             \n\
             if (\n    \
                 os.environ.get(\"{HOOK_ACTIVE_ENV}\") != \"1\"\n    \
                 and os.environ.get(\"DJANGO_SETTINGS_MODULE\")\n    \
                 and os.environ.get(\"{INSTALLED_ENV}\", \"\").strip().lower() not in (\"1\", \"true\", \"yes\", \"on\")\n    \
                 and not os.path.exists({marker})\n\
             ):\n    \
                 os.environ[\"{HOOK_ACTIVE_ENV}\"] = \"1\"\n    \
                 try:\n        \
                     subprocess.run([{exe}, \"--path\", {pdd_dir}, \"install\"], check=False)\n    \
                 except OSError as error:\n        \
                     print(f\"[pdd] could not run the bootstrap: {{error}}\")\n    \
                 finally:\n        \
                     del os.environ[\"{HOOK_ACTIVE_ENV}\"]\n",
            version = env!("CARGO_PKG_VERSION"),
        )
    }

    /// Write the hook into `target_dir`, returning its path
    pub fn execute(&self, target_dir: &Path, options: &HookOptions) -> Result<PathBuf> {
        let path = target_dir.join(HOOK_FILE_NAME);
        match fs::read(&path) {
            Ok(existing) if !existing.starts_with(HOOK_HEADER.as_bytes()) && !options.force => {
                return Err(fs_error::hook_exists(&path));
            }
            Ok(_) => self
                .reporter
                .debug(format!("Replacing existing {}", path.display())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(fs_error::read_failed(&path, &e)),
        }

        fs::write(&path, self.render()).map_err(|e| fs_error::write_failed(&path, &e))?;
        self.reporter
            .info(format!("Wrote start-up hook {}", path.display()));
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PddError;
    use tempfile::TempDir;

    fn operation<'a>(pdd_dir: &'a Path, exe: &'a Path) -> HookOperation<'a> {
        HookOperation::new(pdd_dir, exe, Reporter::default())
    }

    #[test]
    fn test_render_calls_pdd_install_with_pdd_dir() {
        let hook = operation(Path::new("/pdd"), Path::new("/usr/local/bin/pdd")).render();
        assert!(hook.starts_with(HOOK_HEADER));
        assert!(hook.contains(r#"subprocess.run(["/usr/local/bin/pdd", "--path", "/pdd", "install"], check=False)"#));
        assert!(hook.contains(r#"os.path.exists("/pdd/.pdd-installed")"#));
        assert!(hook.contains(r#"os.environ.get("PDD_HOOK_ACTIVE") != "1""#));
        assert!(hook.contains(r#"os.environ.get("PDD_IS_INSTALLED", "")"#));
    }

    #[test]
    fn test_render_quotes_paths() {
        let hook = operation(Path::new("/p\"dd"), Path::new("/bin/pdd")).render();
        assert!(hook.contains(r#""/p\"dd""#));
    }

    #[test]
    fn test_execute_writes_hook() {
        let temp = TempDir::new().unwrap();
        let op = operation(Path::new("/pdd"), Path::new("/bin/pdd"));

        let path = op.execute(temp.path(), &HookOptions::default()).unwrap();
        assert_eq!(path, temp.path().join(HOOK_FILE_NAME));
        assert_eq!(fs::read_to_string(&path).unwrap(), op.render());
    }

    #[test]
    fn test_execute_replaces_own_hook() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(HOOK_FILE_NAME);
        fs::write(&path, format!("{HOOK_HEADER} 0.1.0\nold\n")).unwrap();
        let op = operation(Path::new("/pdd"), Path::new("/bin/pdd"));

        op.execute(temp.path(), &HookOptions::default()).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), op.render());
    }

    #[test]
    fn test_execute_keeps_foreign_hook_unless_forced() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(HOOK_FILE_NAME);
        fs::write(&path, "import coverage\n").unwrap();
        let op = operation(Path::new("/pdd"), Path::new("/bin/pdd"));

        let err = op.execute(temp.path(), &HookOptions::default()).unwrap_err();
        assert!(matches!(err, PddError::HookExists { .. }));
        assert_eq!(fs::read_to_string(&path).unwrap(), "import coverage\n");

        op.execute(temp.path(), &HookOptions { force: true }).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), op.render());
    }

    #[test]
    fn test_execute_missing_directory() {
        let temp = TempDir::new().unwrap();
        let op = operation(Path::new("/pdd"), Path::new("/bin/pdd"));
        assert!(op
            .execute(&temp.path().join("missing"), &HookOptions::default())
            .is_err());
    }
}
