// Author: Dustin Pilgrim
// License: MIT

use eyre::Result;
use std::path::{Path, PathBuf};

pub mod model;
pub mod parser;

pub use model::CounterConfig;

pub const DEFAULT_REFERENCE: &str = "2025-09-01T13:37:00Z";
pub const DEFAULT_FPS: u64 = 60;
pub const MIN_FPS: u64 = 1;
pub const MAX_FPS: u64 = 240;

pub struct LoadedConfig {
    pub cfg: CounterConfig,
    /// `None` when running on built-in defaults.
    pub path: Option<PathBuf>,
}

/// Candidate config files, highest priority first.
pub fn config_search_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("doomsday").join("doomsday.rune"));
    }
    paths.push(PathBuf::from("/etc/doomsday/doomsday.rune"));

    paths
}

/// Load an explicit config file, or the first one found on the search path.
///
/// An explicit path must exist. With no file anywhere the built-in defaults are used.
pub fn load(explicit: Option<&Path>) -> Result<LoadedConfig> {
    if let Some(path) = explicit {
        if !path.exists() {
            return Err(eyre::eyre!("config file {} does not exist", path.display()));
        }
        let path = path.to_path_buf();
        let cfg = parser::load_from_file(&path)?;
        crate::ddebug!("Config", "loaded config from {}", path.display());
        return Ok(LoadedConfig { cfg, path: Some(path) });
    }

    for path in config_search_paths() {
        if path.exists() {
            let cfg = parser::load_from_file(&path)?;
            crate::ddebug!("Config", "loaded config from {}", path.display());
            return Ok(LoadedConfig { cfg, path: Some(path) });
        }
    }

    crate::ddebug!("Config", "no config file found; using built-in defaults");
    Ok(LoadedConfig {
        cfg: CounterConfig::default(),
        path: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_explicit_path_is_an_error() {
        crate::log::set_log_file(None);
        let res = load(Some(Path::new("/nonexistent/doomsday/doomsday.rune")));
        let err = res.err().map(|e| e.to_string()).unwrap_or_default();
        assert!(err.contains("does not exist"), "{err}");
    }

    #[test]
    fn search_paths_end_with_system_config() {
        let paths = config_search_paths();
        assert_eq!(paths.last(), Some(&PathBuf::from("/etc/doomsday/doomsday.rune")));
    }
}
