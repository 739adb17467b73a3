//! Log file path resolution
//!
//! Picks a writable per-user log directory for the current platform, falling
//! back to the executable's directory when that fails. The result is resolved
//! once per process and cached; the first resolution wins.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

const APP_DIR_NAME: &str = "compactlog";
const LOG_FILE_NAME: &str = "log.txt";

static LOG_FILE_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Get the process-wide log file path, resolving it on first access
pub fn log_file_path() -> &'static Path {
    LOG_FILE_PATH.get_or_init(resolve_log_file_path).as_path()
}

/// Resolve the log file path without caching
///
/// Prefers the platform's per-user log/state directory; a directory that
/// cannot be created falls through to the executable's directory.
pub fn resolve_log_file_path() -> PathBuf {
    if let Some(dir) = try_user_log_dir() {
        if std::fs::create_dir_all(&dir).is_ok() {
            return dir.join(LOG_FILE_NAME);
        }
    }
    fallback_exe_dir().join(LOG_FILE_NAME)
}

/// `~/Library/Logs/compactlog` on macOS
#[cfg(target_os = "macos")]
fn try_user_log_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join("Library").join("Logs").join(APP_DIR_NAME))
}

/// `%LOCALAPPDATA%\compactlog\Logs` on Windows
#[cfg(target_os = "windows")]
fn try_user_log_dir() -> Option<PathBuf> {
    dirs::data_local_dir().map(|data| data.join(APP_DIR_NAME).join("Logs"))
}

/// `$XDG_STATE_HOME/compactlog` (or `~/.local/state/compactlog`) elsewhere
#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn try_user_log_dir() -> Option<PathBuf> {
    dirs::state_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".local").join("state")))
        .map(|state| state.join(APP_DIR_NAME))
}

/// Directory of the running executable, or `.` when even that is unknown
fn fallback_exe_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_file_path_is_stable() {
        // Cached after the first call, so repeated calls agree
        let first = log_file_path();
        let second = log_file_path();
        assert_eq!(first, second);
    }

    #[test]
    fn test_log_file_name() {
        let path = resolve_log_file_path();
        assert_eq!(path.file_name().unwrap(), LOG_FILE_NAME);
    }

    #[test]
    fn test_fallback_exe_dir_does_not_panic() {
        let dir = fallback_exe_dir();
        assert!(!dir.as_os_str().is_empty());
    }
}
