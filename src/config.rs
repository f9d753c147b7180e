use anyhow::{Context, Result};
use chrono::Utc;
use deepwork_core::usecase::validate_session_name;
use dirs::config_dir;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::commands::default_session_name;

const APP_NAME: &str = "deepwork";
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Database file to use instead of the platform data directory.
    pub database_path: Option<PathBuf>,
    /// Prefix for session names when `dw plan` is run without one.
    pub session_name_prefix: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_path: None,
            session_name_prefix: "Session".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the user's config directory.
    /// Returns default config if file doesn't exist or fails to parse.
    pub fn load() -> Self {
        let loaded = get_config_path().and_then(|path| Self::load_from(&path));
        match loaded {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Failed to load config, using defaults: {:#}", e);
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).context("Failed to read config file")?;

        let config = serde_json::from_str(&content).context("Failed to parse config file")?;

        Ok(config)
    }

    /// Save the current configuration to disk.
    pub fn save(&self) -> Result<()> {
        self.save_to(&get_config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = serde_json::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, content).context("Failed to write config file")?;

        Ok(())
    }

    /// Overwrites the given fields. A prefix is refused when the session
    /// names built from it would fail the session name rules.
    pub fn apply(
        &mut self,
        database_path: Option<PathBuf>,
        session_name_prefix: Option<String>,
    ) -> Result<()> {
        if let Some(prefix) = session_name_prefix {
            let sample = default_session_name(&prefix, Utc::now());
            validate_session_name(&sample)
                .with_context(|| format!("Session name prefix '{prefix}' is not usable"))?;
            self.session_name_prefix = prefix.trim().to_string();
        }
        if let Some(path) = database_path {
            self.database_path = Some(path);
        }
        Ok(())
    }

    /// The database to open: an explicit override first, then the config
    /// file, then the platform default.
    pub fn resolve_database_path(&self, cli_override: Option<PathBuf>) -> Result<PathBuf> {
        match cli_override.or_else(|| self.database_path.clone()) {
            Some(path) => Ok(path),
            None => crate::db::Database::default_path(),
        }
    }
}

pub fn get_config_path() -> Result<PathBuf> {
    let mut path =
        config_dir().ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
    path.push(APP_NAME);
    path.push(CONFIG_FILE);
    Ok(path)
}
