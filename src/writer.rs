//! Leveled log writer
//!
//! Formats entries, echoes them to the console with per-level colors, appends
//! them to the log file, and compacts the file after every write. All of that
//! happens under one lock, synchronously on the caller's thread, and no
//! failure ever escapes the logging boundary.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

use chrono::Local;
use crossterm::style::{Color, Stylize};

use crate::compact;
use crate::config::LoggerConfig;
use crate::level::Level;
use crate::paths;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Categories of disk errors for user-friendly failure reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DiskErrorKind {
    /// Disk is full or quota exceeded
    DiskFull,
    /// Permission denied (read or write)
    PermissionDenied,
    /// File or directory not found
    NotFound,
    /// Other IO error
    Other,
}

/// Categorize an IO error into a user-friendly category
fn categorize_io_error(e: &std::io::Error) -> DiskErrorKind {
    use std::io::ErrorKind;

    match e.kind() {
        ErrorKind::StorageFull | ErrorKind::WriteZero => DiskErrorKind::DiskFull,
        ErrorKind::PermissionDenied => DiskErrorKind::PermissionDenied,
        ErrorKind::NotFound => DiskErrorKind::NotFound,
        _ => {
            #[cfg(unix)]
            {
                if let Some(os_error) = e.raw_os_error() {
                    // ENOSPC = 28; EDQUOT = 122 on Linux, 69 on macOS
                    if os_error == 28 || os_error == 122 || os_error == 69 {
                        return DiskErrorKind::DiskFull;
                    }
                    // EACCES = 13
                    if os_error == 13 {
                        return DiskErrorKind::PermissionDenied;
                    }
                }
            }
            DiskErrorKind::Other
        }
    }
}

/// Create a user-friendly message from an IO error
fn friendly_io_error_message(e: &std::io::Error) -> String {
    match categorize_io_error(e) {
        DiskErrorKind::DiskFull => "disk full - free space needed".to_string(),
        DiskErrorKind::PermissionDenied => "permission denied".to_string(),
        DiskErrorKind::NotFound => "file or directory not found".to_string(),
        DiskErrorKind::Other => e.to_string(),
    }
}

/// Console + file logger bound to one log file
///
/// One mutex serializes every call: format, console echo, file append, and
/// whole-file compaction all run inside the critical section, so concurrent
/// callers can never interleave or corrupt the file.
pub struct Logger {
    path: PathBuf,
    config: LoggerConfig,
    lock: Mutex<()>,
}

impl Logger {
    /// Create a logger writing to `path`
    pub fn new(path: PathBuf, config: LoggerConfig) -> Self {
        Self {
            path,
            config,
            lock: Mutex::new(()),
        }
    }

    /// Get the path this logger writes to
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Log a message without a source tag
    pub fn log(&self, level: Level, message: &str) {
        self.log_from(level, message, "");
    }

    /// Log a message tagged with its source (empty source means untagged)
    ///
    /// Never panics and never returns an error: an unwritable file degrades
    /// to a console-only report, and a failed compaction leaves the file
    /// as it was.
    pub fn log_from(&self, level: Level, message: &str, source: &str) {
        let _guard = match self.lock.lock() {
            Ok(guard) => guard,
            // A panic while holding the lock poisons it; logging still works
            Err(poisoned) => poisoned.into_inner(),
        };

        let timestamp = Local::now().format(TIMESTAMP_FORMAT);
        let line = if source.is_empty() {
            format!("[{timestamp}] [{level}] {message}")
        } else {
            format!("[{timestamp}] [{source}] [{level}] {message}")
        };

        self.echo_console(level, &line);

        if let Err(e) = self.append_to_file(&line) {
            let report = format!(
                "[ERROR] Failed to open log file '{}' for writing: {}",
                self.path.display(),
                friendly_io_error_message(&e)
            );
            eprintln!("{}", self.colorize(&report, Some(Color::DarkRed)));
        }

        // Best effort: a failed rewrite leaves the previous file intact
        let _ = compact::compact_file(&self.path, self.config.max_lines);
    }

    /// Echo one line to the console, stderr for error/critical levels
    fn echo_console(&self, level: Level, line: &str) {
        let styled = self.colorize(line, level.color());
        if level.is_stderr() {
            eprintln!("{styled}");
        } else {
            println!("{styled}");
        }
    }

    fn colorize(&self, line: &str, color: Option<Color>) -> String {
        match color {
            Some(color) if self.config.color => line.with(color).to_string(),
            _ => line.to_string(),
        }
    }

    fn append_to_file(&self, line: &str) -> std::io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{line}")
    }
}

static GLOBAL_LOGGER: OnceLock<Logger> = OnceLock::new();

/// Get the process-wide logger, initializing it on first use
///
/// The log file path is resolved once and never re-resolved; the config is
/// loaded from `logger.toml` beside the log file, with defaults written on
/// first run and used when the file is unusable.
fn global_logger() -> &'static Logger {
    GLOBAL_LOGGER.get_or_init(|| {
        let path = paths::log_file_path().to_path_buf();
        let config = LoggerConfig::load_or_init_beside(&path).unwrap_or_default();
        Logger::new(path, config)
    })
}

/// Log a message to the process-wide logger
pub fn log(level: Level, message: &str) {
    global_logger().log(level, message);
}

/// Log a message with a source tag to the process-wide logger
pub fn log_from(level: Level, message: &str, source: &str) {
    global_logger().log_from(level, message, source);
}
