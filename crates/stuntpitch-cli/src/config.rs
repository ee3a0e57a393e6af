//! Configuration management for the StuntPitch CLI
//!
//! Stores connection settings and embedding defaults in
//! ~/.config/stuntpitch/config.toml

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use stuntpitch::EmbeddingConfig;

const CONFIG_DIR: &str = "stuntpitch";
const CONFIG_FILE: &str = "config.toml";

/// CLI Configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    pub database_url: Option<String>,
    pub openai_api_key: Option<String>,
    pub openai_base_url: Option<String>,
    #[serde(default)]
    pub embedding: EmbeddingConfig,
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join(CONFIG_DIR);
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE))
    }

    /// Load config from the given file, or the default location.
    ///
    /// A missing file is only tolerated at the default location.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => {
                if !p.exists() {
                    bail!("Config file {:?} does not exist", p);
                }
                Self::read(p)
            }
            None => {
                let default_path = Self::config_path()?;
                if default_path.exists() {
                    Self::read(&default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    fn read(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {:?}", path))?;

        Ok(config)
    }
}
