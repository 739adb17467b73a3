//! compactlog - leveled console + file logger with a self-compacting log file
//!
//! Every entry is echoed to the console (color-coded, stderr for errors) and
//! appended to a per-user `log.txt`. After each write the whole file is
//! deduplicated: entries sharing the same `[LEVEL] message` collapse into one
//! line with a ` (repeated N times)` suffix, and only the most recently
//! touched 1000 distinct entries are kept.
//!
//! ```no_run
//! use compactlog::{log, log_from, Level};
//!
//! log(Level::Info, "engine started");
//! log_from(Level::Warning, "shader cache miss", "Renderer");
//! ```

pub mod compact;
pub mod config;
pub mod level;
pub mod paths;
pub mod writer;

pub use config::LoggerConfig;
pub use level::Level;
pub use writer::{log, log_from, Logger};
