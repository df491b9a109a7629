// Author: Dustin Pilgrim
// License: MIT

use chrono::Local;
use once_cell::sync::Lazy;
use std::fmt::Arguments;
use std::fs::{self, OpenOptions, create_dir_all};
use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, Once};

/// Maximum log file size in bytes before rotation (5 MiB)
const MAX_LOG_SIZE: u64 = 5 * 1024 * 1024;
const KEEP_BACKUPS: u32 = 3;

#[derive(PartialEq, PartialOrd, Clone, Copy, Debug)]
pub enum LogLevel {
    Error = 1,
    Warn  = 2,
    Info  = 3,
    Debug = 4,
}

impl LogLevel {
    /// Get ANSI color code for terminal output
    fn color(&self) -> &'static str {
        match self {
            LogLevel::Error => "\x1b[31m", // Red
            LogLevel::Warn  => "\x1b[33m", // Yellow
            LogLevel::Info  => "\x1b[36m", // Cyan
            LogLevel::Debug => "\x1b[90m", // Gray
        }
    }

    fn short(&self) -> &'static str {
        match self {
            LogLevel::Error => "ERR",
            LogLevel::Warn  => "WRN",
            LogLevel::Info  => "INF",
            LogLevel::Debug => "DBG",
        }
    }
}

const RESET_COLOR: &str = "\x1b[0m";

pub struct Config {
    pub level: LogLevel,
    pub use_colors: bool,
    /// `None` disables the file sink.
    pub file: Option<PathBuf>,
}

pub static GLOBAL_CONFIG: Lazy<Mutex<Config>> = Lazy::new(|| {
    Mutex::new(Config {
        level: LogLevel::Info,
        use_colors: io::stderr().is_terminal(),
        file: Some(log_path()),
    })
});

static SESSION_SEPARATOR: Once = Once::new();

fn config() -> MutexGuard<'static, Config> {
    GLOBAL_CONFIG.lock().unwrap_or_else(|e| e.into_inner())
}

/// Set verbose/debug mode
pub fn set_verbose(enabled: bool) {
    config().level = if enabled { LogLevel::Debug } else { LogLevel::Info };
}

#[cfg(test)]
pub fn set_log_file(path: Option<PathBuf>) {
    config().file = path;
}

/// Whether a message at `level` passes the configured threshold.
pub fn enabled(level: LogLevel, threshold: LogLevel) -> bool {
    level <= threshold
}

/// Core logging function
pub fn log_message(level: LogLevel, prefix: &str, args: Arguments) {
    let config = config();

    if !enabled(level, config.level) {
        return;
    }

    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");

    // File format (with short level indicator)
    let file_line = format!("[{}][{}][{}] {}", timestamp, level.short(), prefix, args);

    if let Some(path) = config.file.as_deref() {
        if let Err(e) = write_line_to_log(path, &file_line) {
            eprintln!("Failed to write log: {}", e);
        }
    }

    // stdout belongs to the counter frame, so the console echo always goes to stderr.
    if config.level == LogLevel::Debug || level == LogLevel::Error {
        if config.use_colors {
            eprintln!("{}●{} [{}][{}] {}", level.color(), RESET_COLOR, timestamp, prefix, args);
        } else {
            eprintln!("{}", file_line);
        }
    }
}

/// Flexible macro to allow formatted logging
#[macro_export]
macro_rules! dlog {
    ($level:expr, $prefix:expr, $($arg:tt)*) => {
        $crate::log::log_message($level, $prefix, format_args!($($arg)*))
    };
}

/// Convenience macros
#[macro_export]
macro_rules! dinfo {
    ($prefix:expr, $($arg:tt)*) => { $crate::dlog!($crate::log::LogLevel::Info, $prefix, $($arg)*) };
}

#[macro_export]
macro_rules! dwarn {
    ($prefix:expr, $($arg:tt)*) => { $crate::dlog!($crate::log::LogLevel::Warn, $prefix, $($arg)*) };
}

#[macro_export]
macro_rules! derror {
    ($prefix:expr, $($arg:tt)*) => { $crate::dlog!($crate::log::LogLevel::Error, $prefix, $($arg)*) };
}

#[macro_export]
macro_rules! ddebug {
    ($prefix:expr, $($arg:tt)*) => { $crate::dlog!($crate::log::LogLevel::Debug, $prefix, $($arg)*) };
}

/// Get log file path
pub fn log_path() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("/tmp"))
        .join("doomsday")
        .join("doomsday.log")
}

/// Shift `log.1 -> log.2 ...` and move the live file to `log.1` once it grows past `max_bytes`.
fn rotate_log_if_needed(path: &Path, max_bytes: u64, keep_backups: u32) -> io::Result<()> {
    let len = match fs::metadata(path) {
        Ok(m) => m.len(),
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(e),
    };

    if len < max_bytes {
        return Ok(());
    }

    if keep_backups == 0 {
        return fs::remove_file(path);
    }

    for i in (1..keep_backups).rev() {
        let from = rotated_name(path, i);
        if from.exists() {
            let _ = fs::rename(from, rotated_name(path, i + 1));
        }
    }

    fs::rename(path, rotated_name(path, 1))
}

fn rotated_name(base: &Path, n: u32) -> PathBuf {
    PathBuf::from(format!("{}.{}", base.display(), n))
}

/// Ensure session newline once
fn ensure_session_newline_once(path: &Path) {
    SESSION_SEPARATOR.call_once(|| {
        if let Ok(meta) = fs::metadata(path) {
            if meta.len() > 0 {
                if let Ok(mut file) = OpenOptions::new().append(true).open(path) {
                    let _ = writeln!(file);
                }
            }
        }
    });
}

/// Write a line to the log file
fn write_line_to_log(path: &Path, line: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        create_dir_all(parent)?;
    }
    rotate_log_if_needed(path, MAX_LOG_SIZE, KEEP_BACKUPS)?;
    ensure_session_newline_once(path);

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;

    writeln!(file, "{}", line)?;
    Ok(())
}
