//! Log severity levels
//!
//! Defines the six levels used in rendered lines, their console colors,
//! and which console stream each level is routed to.

use crossterm::style::Color;

/// Log level for a single entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Trace,
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl Level {
    /// Get the display name used in rendered lines
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Trace => "TRACE",
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warning => "WARNING",
            Level::Error => "ERROR",
            Level::Critical => "CRITICAL",
        }
    }

    /// Console color for this level, or `None` for uncolored output
    pub fn color(&self) -> Option<Color> {
        match self {
            Level::Trace => Some(Color::DarkBlue),
            Level::Debug => None,
            Level::Info => Some(Color::DarkGrey),
            Level::Warning => Some(Color::DarkYellow),
            Level::Error => Some(Color::DarkRed),
            Level::Critical => Some(Color::Red),
        }
    }

    /// Check if this level is echoed to stderr instead of stdout
    pub fn is_stderr(&self) -> bool {
        matches!(self, Level::Error | Level::Critical)
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_display_names() {
        assert_eq!(Level::Trace.as_str(), "TRACE");
        assert_eq!(Level::Warning.as_str(), "WARNING");
        assert_eq!(Level::Critical.as_str(), "CRITICAL");
        assert_eq!(Level::Info.to_string(), "INFO");
    }

    #[test]
    fn test_stderr_routing() {
        assert!(!Level::Trace.is_stderr());
        assert!(!Level::Debug.is_stderr());
        assert!(!Level::Info.is_stderr());
        assert!(!Level::Warning.is_stderr());
        assert!(Level::Error.is_stderr());
        assert!(Level::Critical.is_stderr());
    }

    #[test]
    fn test_debug_is_uncolored() {
        assert!(Level::Debug.color().is_none());
        assert!(Level::Error.color().is_some());
    }
}
