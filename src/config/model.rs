// Author: Dustin Pilgrim
// License: MIT

use chrono::{DateTime, Utc};

use crate::core::error::{ConfigError, Error};

use super::{DEFAULT_FPS, DEFAULT_REFERENCE, MAX_FPS, MIN_FPS};

#[derive(Debug, Clone, PartialEq)]
pub struct CounterConfig {
    /// Initial reference instant, used until the first reset.
    pub reference: DateTime<Utc>,
    pub fps: u64,
    pub colors: bool,
    pub show_legend: bool,
    pub show_history: bool,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            reference: default_reference(),
            fps: DEFAULT_FPS,
            colors: true,
            show_legend: true,
            show_history: true,
        }
    }
}

impl CounterConfig {
    /// Apply command-line overrides on top of file values.
    pub fn apply_overrides(
        &mut self,
        since: Option<&str>,
        fps: Option<u64>,
        no_color: bool,
    ) -> Result<(), Error> {
        if let Some(raw) = since {
            self.reference = parse_reference(raw)?;
        }
        if let Some(fps) = fps {
            self.fps = validate_fps(fps)?;
        }
        if no_color {
            self.colors = false;
        }
        Ok(())
    }

    pub fn frame_interval_ms(&self) -> u64 {
        (1000 / self.fps.max(1)).max(1)
    }
}

pub fn parse_reference(raw: &str) -> Result<DateTime<Utc>, Error> {
    DateTime::parse_from_rfc3339(raw.trim())
        .map(|t| t.with_timezone(&Utc))
        .map_err(|_| Error::InvalidTimestamp(raw.to_string()))
}

pub fn validate_fps(fps: u64) -> Result<u64, Error> {
    if (MIN_FPS..=MAX_FPS).contains(&fps) {
        Ok(fps)
    } else {
        Err(Error::InvalidConfig(ConfigError::FpsOutOfRange(fps)))
    }
}

fn default_reference() -> DateTime<Utc> {
    // DEFAULT_REFERENCE is a valid literal; the epoch fallback is unreachable.
    parse_reference(DEFAULT_REFERENCE).unwrap_or_default()
}
