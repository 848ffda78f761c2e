use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

/// Top-level configuration stored on disk.
///
/// The OpenWeather key is the one secret this system exists to protect:
/// it lives only here (or in the environment), never in client-visible
/// code. The map token is client-side by nature but still required at
/// startup so a misconfigured deployment fails immediately instead of
/// rendering a blank map.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// API key for the weather/geocoding provider.
    pub openweather_api_key: Option<String>,

    /// Access token handed to the map-rendering library.
    pub mapbox_access_token: Option<String>,

    /// Proxy listen address, e.g. "127.0.0.1:3000". Optional; the
    /// binary has its own default.
    pub listen_addr: Option<String>,
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't
    /// exist yet, then apply environment overrides
    /// (`OPENWEATHER_API_KEY`, `MAPBOX_ACCESS_TOKEN`).
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        Self::load_from(&path)
    }

    /// Same as [`Config::load`] but with an explicit file path, for
    /// deployments that do not use the platform config directory.
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        let mut cfg = if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;

            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?
        } else {
            Self::default()
        };

        cfg.apply_env_overrides();
        Ok(cfg)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var("OPENWEATHER_API_KEY")
            && !key.is_empty()
        {
            self.openweather_api_key = Some(key);
        }
        if let Ok(token) = std::env::var("MAPBOX_ACCESS_TOKEN")
            && !token.is_empty()
        {
            self.mapbox_access_token = Some(token);
        }
    }

    /// Provider API key, or a fatal error with a hint.
    pub fn require_api_key(&self) -> Result<&str> {
        self.openweather_api_key.as_deref().ok_or_else(|| {
            anyhow!(
                "No OpenWeather API key configured.\n\
                 Hint: set `openweather_api_key` in the config file or export OPENWEATHER_API_KEY."
            )
        })
    }

    /// Map access token. Required at startup even though only the
    /// client consumes it; absence is a configuration error, not a
    /// runtime one.
    pub fn require_map_token(&self) -> Result<&str> {
        self.mapbox_access_token.as_deref().ok_or_else(|| {
            anyhow!(
                "Mapbox access token is missing.\n\
                 Hint: set `mapbox_access_token` in the config file or export MAPBOX_ACCESS_TOKEN."
            )
        })
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "mapweather", "mapweather")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
