// Author: Dustin Pilgrim
// License: MIT

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A reference instant could not be parsed.
    ///
    /// Examples:
    /// - `reference = "yesterday"` in the config file
    /// - `--since 2025-13-01`
    InvalidTimestamp(String),

    /// A config value is outside what the counter accepts.
    InvalidConfig(ConfigError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Frame rate must be within `MIN_FPS..=MAX_FPS`.
    FpsOutOfRange(u64),
}

// ---------------- Display ----------------

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidTimestamp(raw) => {
                write!(f, "invalid timestamp '{raw}' (expected RFC 3339, e.g. 2025-09-01T13:37:00Z)")
            }
            Error::InvalidConfig(e) => write!(f, "{e}"),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::FpsOutOfRange(v) => write!(
                f,
                "fps {v} out of range ({}..={})",
                crate::config::MIN_FPS,
                crate::config::MAX_FPS
            ),
        }
    }
}

impl std::error::Error for Error {}
