//! Configuration file and environment handling
//!
//! Resolution order: explicit `--config` path, `./dbdump.toml`, then
//! `<config dir>/dbdump/config.toml`. Missing files fall back to defaults.
//! `DATABASE_URL` from the environment (or `.env`) overrides the file.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::emit::EscapeStyle;

pub const LOCAL_CONFIG_FILE: &str = "dbdump.toml";
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub database_url: Option<String>,
    pub entities: EntitiesConfig,
    pub dump: DumpConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EntitiesConfig {
    /// Directory holding mapping descriptors
    pub root: PathBuf,
    /// Namespace prefix for discovered identifiers
    pub namespace: String,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct DumpConfig {
    pub exclude: Vec<String>,
    pub escape: EscapeStyle,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: None,
            entities: EntitiesConfig::default(),
            dump: DumpConfig::default(),
        }
    }
}

impl Default for EntitiesConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("src/Entity"),
            namespace: "app::entity".to_string(),
        }
    }
}

impl Config {
    /// Load configuration, applying environment overrides
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        // A missing .env is fine
        let _ = dotenvy::dotenv();

        let mut config = match Self::locate(explicit)? {
            Some(path) => Self::from_file(&path)?,
            None => {
                log::debug!("No config file found, using defaults");
                Self::default()
            }
        };

        if let Ok(url) = std::env::var(DATABASE_URL_ENV) {
            if !url.trim().is_empty() {
                config.database_url = Some(url);
            }
        }

        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config = Self::parse(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Database URL or a helpful error
    pub fn require_database_url(&self) -> Result<&str> {
        self.database_url.as_deref().ok_or_else(|| {
            anyhow::anyhow!(
                "No database configured. Set {} or add database_url to {}",
                DATABASE_URL_ENV,
                LOCAL_CONFIG_FILE
            )
        })
    }

    fn locate(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
        if let Some(path) = explicit {
            if !path.exists() {
                anyhow::bail!("Config file does not exist: {}", path.display());
            }
            return Ok(Some(path.to_path_buf()));
        }

        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.exists() {
            return Ok(Some(local));
        }

        Ok(dirs::config_dir()
            .map(|dir| dir.join("dbdump").join("config.toml"))
            .filter(|path| path.exists()))
    }
}
