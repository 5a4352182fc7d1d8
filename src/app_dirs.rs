//! Where digitpad keeps its files.
//!
//! Everything lives in one `.digitpad` folder under the OS config directory
//! (e.g., `%APPDATA%` on Windows, `~/.config` on Linux). Setting
//! `DIGITPAD_CONFIG_HOME` moves that base for tests or portable setups.

use std::{
    path::PathBuf,
    sync::{LazyLock, Mutex},
};

use directories::BaseDirs;
use thiserror::Error;

/// Name of the application directory that lives under the OS config root.
pub const APP_DIR_NAME: &str = ".digitpad";
/// Environment variable that replaces the OS config directory.
pub const CONFIG_HOME_ENV: &str = "DIGITPAD_CONFIG_HOME";

const LOGS_DIR_NAME: &str = "logs";

static BASE_OVERRIDE: LazyLock<Mutex<Option<PathBuf>>> = LazyLock::new(|| Mutex::new(None));

/// Errors raised while resolving or creating application directories.
#[derive(Debug, Error)]
pub enum AppDirError {
    /// Neither the override nor the OS provided a config directory.
    #[error("No suitable base config directory available for application files")]
    NoBaseDir,
    /// The directory could not be created.
    #[error("Failed to create application directory at {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Return the `.digitpad` directory, creating it if needed.
pub fn app_root_dir() -> Result<PathBuf, AppDirError> {
    let base = base_dir().ok_or(AppDirError::NoBaseDir)?;
    ensure_dir(base.join(APP_DIR_NAME))
}

/// Return `.digitpad/logs`, creating it if needed.
pub fn logs_dir() -> Result<PathBuf, AppDirError> {
    ensure_dir(app_root_dir()?.join(LOGS_DIR_NAME))
}

fn ensure_dir(path: PathBuf) -> Result<PathBuf, AppDirError> {
    std::fs::create_dir_all(&path).map_err(|source| AppDirError::CreateDir {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

fn base_dir() -> Option<PathBuf> {
    if let Some(path) = BASE_OVERRIDE.lock().ok().and_then(|guard| guard.clone()) {
        return Some(path);
    }
    if let Some(path) = std::env::var_os(CONFIG_HOME_ENV).filter(|value| !value.is_empty()) {
        return Some(PathBuf::from(path));
    }
    BaseDirs::new().map(|dirs| dirs.config_dir().to_path_buf())
}

/// Point the base directory at `path` until the guard drops.
///
/// Guards serialize on a shared lock so parallel tests never see each other's base.
#[cfg(test)]
pub(crate) struct BaseDirGuard {
    _serial: std::sync::MutexGuard<'static, ()>,
}

#[cfg(test)]
impl BaseDirGuard {
    pub(crate) fn set(path: &std::path::Path) -> Self {
        static SERIAL: Mutex<()> = Mutex::new(());
        let serial = SERIAL.lock().unwrap_or_else(|err| err.into_inner());
        *BASE_OVERRIDE.lock().unwrap_or_else(|err| err.into_inner()) = Some(path.to_path_buf());
        Self { _serial: serial }
    }
}

#[cfg(test)]
impl Drop for BaseDirGuard {
    fn drop(&mut self) {
        *BASE_OVERRIDE.lock().unwrap_or_else(|err| err.into_inner()) = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn root_dir_lives_under_override() {
        let base = tempdir().unwrap();
        let _guard = BaseDirGuard::set(base.path());
        let root = app_root_dir().unwrap();
        assert_eq!(root, base.path().join(APP_DIR_NAME));
        assert!(root.is_dir());
    }

    #[test]
    fn logs_dir_is_nested_in_root() {
        let base = tempdir().unwrap();
        let _guard = BaseDirGuard::set(base.path());
        let logs = logs_dir().unwrap();
        assert_eq!(logs, base.path().join(APP_DIR_NAME).join(LOGS_DIR_NAME));
        assert!(logs.is_dir());
    }
}
