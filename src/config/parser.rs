// Author: Dustin Pilgrim
// License: MIT

use eyre::{Result, WrapErr};
use rune_cfg::RuneConfig;
use std::path::PathBuf;

use super::model::{parse_reference, validate_fps, CounterConfig};

/// Parses the counter configuration from a RuneConfig. Missing keys keep their defaults.
pub fn parse_counter_config(config: &RuneConfig) -> Result<CounterConfig> {
    let mut cfg = CounterConfig::default();

    if let Ok(raw) = config.get::<String>("doomsday.reference") {
        cfg.reference = parse_reference(&raw).wrap_err("doomsday.reference")?;
    }

    if let Ok(fps) = config.get::<u64>("doomsday.fps") {
        cfg.fps = validate_fps(fps).wrap_err("doomsday.fps")?;
    }

    if let Ok(colors) = config.get::<bool>("doomsday.colors") {
        cfg.colors = colors;
    }

    if let Ok(show) = config
        .get::<bool>("doomsday.show_legend")
        .or_else(|_| config.get::<bool>("doomsday.show-legend"))
    {
        cfg.show_legend = show;
    }

    if let Ok(show) = config
        .get::<bool>("doomsday.show_history")
        .or_else(|_| config.get::<bool>("doomsday.show-history"))
    {
        cfg.show_history = show;
    }

    Ok(cfg)
}

pub fn load_from_file(path: &PathBuf) -> Result<CounterConfig> {
    let config = RuneConfig::from_file(path)
        .map_err(|e| eyre::eyre!("{e}"))
        .wrap_err_with(|| format!("failed to load config from {}", path.display()))?;

    parse_counter_config(&config)
        .wrap_err_with(|| format!("invalid config in {}", path.display()))
}
