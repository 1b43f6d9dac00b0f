//! Parses config file
//!
//! Everything is optional. A missing `config.toml` next to the binary means defaults.
use std::{
    env,
    fs::OpenOptions,
    io::Read,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use spr::OutfitColors;

use crate::{err, utils::constants::DEFAULT_SPRITES_PER_ROW};

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub sprites_per_row: usize,
    pub outfit: OutfitConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sprites_per_row: DEFAULT_SPRITES_PER_ROW,
            outfit: OutfitConfig::default(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct OutfitConfig {
    pub head: [u8; 3],
    pub body: [u8; 3],
    pub legs: [u8; 3],
    pub feet: [u8; 3],
}

impl Default for OutfitConfig {
    fn default() -> Self {
        let OutfitColors {
            head,
            body,
            legs,
            feet,
        } = OutfitColors::default();

        Self {
            head,
            body,
            legs,
            feet,
        }
    }
}

impl From<OutfitConfig> for OutfitColors {
    fn from(value: OutfitConfig) -> Self {
        let OutfitConfig {
            head,
            body,
            legs,
            feet,
        } = value;

        Self {
            head,
            body,
            legs,
            feet,
        }
    }
}

pub static CONFIG_FILE_NAME: &str = "config.toml";

/// Parse `config.toml` in the same folder as the binary
pub fn parse_config() -> eyre::Result<Config> {
    let path = match env::current_exe() {
        Ok(path) => path
            .parent()
            .map(|parent| parent.join(CONFIG_FILE_NAME))
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME)),
        Err(_) => PathBuf::from(CONFIG_FILE_NAME),
    };

    if !path.exists() {
        log::debug!("no {} at {}, using defaults", CONFIG_FILE_NAME, path.display());
        return Ok(Config::default());
    }

    parse_config_from_file(path.as_path())
}

pub fn parse_config_from_file(path: &Path) -> eyre::Result<Config> {
    let mut file = OpenOptions::new().read(true).open(path.as_os_str())?;
    let mut buffer = String::new();

    file.read_to_string(&mut buffer)?;

    parse_config_from_str(&buffer)
}

pub fn parse_config_from_str(s: &str) -> eyre::Result<Config> {
    let config: Config = toml::from_str(s)?;

    if config.sprites_per_row == 0 {
        return err!("sprites_per_row must be at least 1");
    }

    Ok(config)
}
