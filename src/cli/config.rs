//! Configuration file support.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::remote::DEFAULT_API_URL;

/// Environment variable naming the API base URL.
pub const API_URL_ENV: &str = "AINOTES_API_URL";

/// Application configuration loaded from config file.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Base URL of the notes API
    pub api_url: Option<String>,
}

impl Config {
    /// Load configuration from the default config file location.
    ///
    /// Returns default config if the file doesn't exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from `path`, or defaults if it doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Returns the path to the config file.
    ///
    /// Default: `~/.config/ainotes/config.toml`
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("ainotes")
            .join("config.toml")
    }

    /// Resolve the API base URL, with CLI argument taking precedence.
    ///
    /// Precedence order:
    /// 1. CLI `--api-url` argument
    /// 2. `AINOTES_API_URL` environment variable
    /// 3. Config file `api_url` setting
    /// 4. `http://localhost:8000/api`
    pub fn api_url(&self, cli_url: Option<&str>) -> String {
        self.resolve_api_url(cli_url, std::env::var(API_URL_ENV).ok())
    }

    fn resolve_api_url(&self, cli_url: Option<&str>, env_url: Option<String>) -> String {
        cli_url
            .map(str::to_string)
            .or(env_url.filter(|u| !u.trim().is_empty()))
            .or_else(|| self.api_url.clone())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
    }
}
